pub mod fp;
pub mod fp2;
pub mod montgomery;
pub mod params;

pub use fp::{Form, Fp, Montgomery, Plain, Representation};
pub use fp2::Fp2;
pub use montgomery::Reduction;
pub use params::{FieldConfig, ModulusParameters};
