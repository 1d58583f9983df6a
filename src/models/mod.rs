pub mod exclusion;
pub mod policy;
pub mod reading;
pub mod table;

pub use exclusion::ExclusionSet;
pub use policy::{
    BucketingPolicy, DEFAULT_TRUNCATION_DIGIT, MAX_TRUNCATION_DIGIT, TYPICAL_FOCAL_LENGTHS,
};
pub use reading::{BucketKey, FocalLengthReading, NO_DATA_LABEL};
pub use table::FrequencyTable;
