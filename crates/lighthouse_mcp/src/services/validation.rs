use crate::errors::LighthouseServerError;

pub trait Validate {
    fn validate(&self) -> Result<(), LighthouseServerError>;
}
