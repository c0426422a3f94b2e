use proptest::prelude::*;

use fixedpeak::config::PeakConfig;
use fixedpeak::constants::FIXED_SHIFT;
use fixedpeak::{
    Fixed, MAX_PEAKS, MAX_SIGNAL_LENGTH, PeakFinder, WideFixed, analyze_peak, find_prominent_peak,
    find_prominent_peak_buffered, peak_prominence_as_real,
};

/// Strictly rising run into an apex followed by a strictly falling run.
fn single_peak_signal() -> impl Strategy<Value = (Vec<i16>, usize)> {
    (
        11i16..1000,
        prop::collection::vec(1i16..100, 1..40),
        prop::collection::vec(1i16..100, 1..40),
    )
        .prop_map(|(start, rises, falls)| {
            let mut signal = vec![start];
            for step in &rises {
                let last = signal[signal.len() - 1];
                signal.push(last + step);
            }
            let apex = signal.len() - 1;
            for step in &falls {
                let last = signal[signal.len() - 1];
                signal.push(last - step);
            }
            (signal, apex)
        })
}

proptest! {
    #[test]
    fn prop_single_peak_found_with_boundary_prominence((signal, apex) in single_peak_signal()) {
        let report = analyze_peak(&signal, None).unwrap();

        let first = signal[0];
        let last = signal[signal.len() - 1];
        let expected = ((signal[apex] - first.max(last)) as WideFixed) << FIXED_SHIFT;

        prop_assert_eq!(report.index, apex);
        prop_assert_eq!(report.value, signal[apex]);
        prop_assert_eq!(report.prominence, expected);
        prop_assert!(!report.truncated);
    }
}

proptest! {
    #[test]
    fn prop_all_scratch_variants_agree(signal in prop::collection::vec(any::<i16>(), 0..600)) {
        let mut fixed: Vec<Fixed> = vec![0; MAX_SIGNAL_LENGTH];
        let mut candidates = [0usize; MAX_PEAKS];
        let mut finder = PeakFinder::default();

        let shared = find_prominent_peak(&signal, None);
        let buffered = find_prominent_peak_buffered(&signal, None, &mut fixed, &mut candidates);
        let owned = finder.find(&signal).map(|report| report.index);

        prop_assert_eq!(&shared, &buffered);
        prop_assert_eq!(&shared, &owned);
    }
}

proptest! {
    #[test]
    fn prop_reported_peak_is_consistent(signal in prop::collection::vec(-2000i16..2000, 3..200)) {
        let config = PeakConfig::default();
        if let Ok(report) = analyze_peak(&signal, Some(&config)) {
            prop_assert!(report.index >= 1 && report.index <= signal.len() - 2);
            prop_assert_eq!(report.value, signal[report.index]);
            prop_assert!(report.prominence >= config.prominence_threshold as WideFixed);
            prop_assert!(((report.value as WideFixed) << FIXED_SHIFT) > config.noise_floor as WideFixed);
            prop_assert!(report.candidates <= MAX_PEAKS);
            prop_assert_eq!(peak_prominence_as_real(&signal, report.index), report.prominence_real());
        }
    }
}

proptest! {
    #[test]
    fn prop_offset_does_not_move_peak(
        signal in prop::collection::vec(-1000i16..1000, 3..200),
        offset in -1000i16..1000,
    ) {
        // With the noise floor out of the way, detection only sees differences
        let config = PeakConfig::default().with_noise_floor(Fixed::MIN);
        let shifted: Vec<i16> = signal.iter().map(|&s| s + offset).collect();

        prop_assert_eq!(
            find_prominent_peak(&signal, Some(&config)),
            find_prominent_peak(&shifted, Some(&config))
        );
    }
}
