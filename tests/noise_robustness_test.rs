use fixedpeak::config::PeakConfig;
use fixedpeak::simulation::{
    AdcPulseConfig, NoiseConfig, apply_noise, generate_adc_pulse, generate_triangle,
};
use fixedpeak::{PeakError, PeakFinder, analyze_peak, find_prominent_peak};

const SEEDS: [u64; 8] = [1, 2, 3, 42, 1234, 9999, 31337, 0xDEAD_BEEF];

/// Narrow tall pulse: the noise is far too small to move the apex or to give
/// any other candidate comparable prominence.
fn tall_pulse(noise: NoiseConfig) -> AdcPulseConfig {
    AdcPulseConfig {
        len: 64,
        center: 32.0,
        width: 4.0,
        amplitude: 2000.0,
        baseline: 512,
        noise,
    }
}

#[test]
fn test_clean_triangle_at_every_interior_apex() {
    for apex in 2..62 {
        let signal = generate_triangle(64, apex, 0, 1000);
        let report = analyze_peak(&signal, None).unwrap();
        assert_eq!(report.index, apex, "apex {}", apex);
        assert_eq!(report.value, 1000);
    }
}

#[test]
fn test_pulse_found_under_uniform_noise() {
    for seed in SEEDS {
        let config = tall_pulse(NoiseConfig::default().with_seed(seed).with_uniform(20));
        let signal = generate_adc_pulse(&config);

        let report = analyze_peak(&signal, None).unwrap();

        assert_eq!(report.index, 32, "seed {}", seed);
        assert!(report.prominence_real() > 1900.0, "seed {}", seed);
        assert!(!report.truncated);
    }
}

#[test]
fn test_pulse_found_under_gaussian_noise() {
    for seed in SEEDS {
        let config = tall_pulse(NoiseConfig::default().with_seed(seed).with_gaussian(5.0));
        let signal = generate_adc_pulse(&config);

        assert_eq!(find_prominent_peak(&signal, None), Ok(32), "seed {}", seed);
    }
}

#[test]
fn test_noise_alone_produces_only_shallow_peaks() {
    // Uniform noise of +/-20 around a baseline: any reported peak stands at
    // most 40 above its reference level.
    let mut finder = PeakFinder::default();
    for seed in SEEDS {
        let mut signal = vec![512i16; 128];
        apply_noise(
            &mut signal,
            &NoiseConfig::default().with_seed(seed).with_uniform(20),
        );

        match finder.find(&signal) {
            Ok(report) => assert!(report.prominence_real() <= 40.0, "seed {}", seed),
            Err(PeakError::NoPeakFound(_)) => {}
            Err(e) => panic!("seed {}: unexpected error {}", seed, e),
        }
    }
}

#[test]
fn test_prominence_threshold_rejects_noise_but_keeps_pulse() {
    let config = PeakConfig::from_real(100.0, 0.1, 10.0).unwrap();
    let mut finder = PeakFinder::new(config);

    for seed in SEEDS {
        let mut quiet = vec![512i16; 64];
        apply_noise(
            &mut quiet,
            &NoiseConfig::default().with_seed(seed).with_uniform(20),
        );
        assert!(
            matches!(finder.find(&quiet), Err(PeakError::NoPeakFound(_))),
            "seed {}",
            seed
        );

        let pulse = generate_adc_pulse(&tall_pulse(
            NoiseConfig::default().with_seed(seed).with_uniform(20),
        ));
        assert_eq!(finder.find(&pulse).unwrap().index, 32, "seed {}", seed);
    }
}

#[test]
fn test_seeded_capture_gives_identical_result() {
    let config = AdcPulseConfig {
        noise: NoiseConfig::default().with_seed(77).with_uniform(20),
        ..AdcPulseConfig::default()
    };

    let first = generate_adc_pulse(&config);
    let second = generate_adc_pulse(&config);

    assert_eq!(first, second);
    assert_eq!(analyze_peak(&first, None), analyze_peak(&second, None));
}
