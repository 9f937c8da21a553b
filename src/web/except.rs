use crate::erx::{Erx, Layouted, PreL4};
use crate::tos;
use crate::web::api::Out;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

// Except is used by list api handlers.
// wraps the predefined failures, converts fast to an Out response
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Except {
    NotFound,
    Unknown(String),
    InvalidParam(String),
    /// a listing error carrying its own layered code
    Listing(Erx),
}

impl Except {
    pub fn status(&self) -> StatusCode {
        match self {
            Except::NotFound => StatusCode::NOT_FOUND,
            Except::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Except::InvalidParam(_) | Except::Listing(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// convert to response object
    pub fn out<T>(&self) -> Out<T> {
        match self {
            Except::NotFound => Out::code_message(Layouted::common(PreL4::WEBS.four(), "0404"), "not found"),
            Except::Unknown(m) => {
                let m = if m.is_empty() { "Something unexpected happened, please try again later." } else { m };
                Out { code: Layouted::common(PreL4::COMM.four(), "9999").into(), message: tos!(m), data: None, status: None }
            },
            Except::InvalidParam(m) => {
                let m = if m.is_empty() { "invalid params" } else { m };
                Out { code: Layouted::common(PreL4::COMM.four(), "1000").into(), message: tos!(m), data: None, status: None }
            },
            Except::Listing(e) => Out::code_message(e.code(), e.message()),
        }
        .with_status(self.status())
    }
}

impl From<Erx> for Except {
    fn from(value: Erx) -> Self {
        Except::Listing(value)
    }
}

impl IntoResponse for Except {
    fn into_response(self) -> Response {
        self.out::<()>().into_response()
    }
}
