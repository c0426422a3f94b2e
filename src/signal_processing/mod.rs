pub mod candidate_detector;
pub mod fixed_point;
pub mod gradient;
pub mod prominence;

pub use candidate_detector::{CandidateDetector, Candidates};
pub use fixed_point::{
    Fixed, WideFixed, convert_signal, fixed_to_real, from_fixed, real_to_fixed, to_fixed,
};
pub use gradient::gradient_at;
pub use prominence::{Selection, select_prominent_peak, topological_prominence};
