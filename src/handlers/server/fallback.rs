use crate::errors::code_error::{CodeError, CodeErrorResp};

pub async fn fallback_handler() -> CodeErrorResp {
    CodeError::NOT_FOUND.into()
}
