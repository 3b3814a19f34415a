use crate::domain::reversal_validator::ReversalValidationError;
use shared::ReversalFieldError;

pub struct ErrorMapper;

impl ErrorMapper {
    pub fn to_dto(error: &ReversalValidationError) -> ReversalFieldError {
        ReversalFieldError {
            kind: error.kind(),
            title: error.title().to_string(),
            message: error.to_string(),
            field: error.field().to_string(),
        }
    }
}
