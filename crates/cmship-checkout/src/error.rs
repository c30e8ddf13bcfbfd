use cmship_estimator::EstimateError;

use crate::flow::StageKind;

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("cannot {action} while {stage}")]
    InvalidTransition {
        action: &'static str,
        stage: StageKind,
    },

    #[error("no suggestion at index {index} ({available} available)")]
    NoSuchSuggestion { index: usize, available: usize },

    #[error("shipping address is empty")]
    EmptyAddress,

    #[error(transparent)]
    Estimate(#[from] EstimateError),
}

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("shipping location has not been confirmed")]
    ShippingNotConfirmed,

    #[error("mobile money number is required")]
    MissingPaymentNumber,

    #[error("guest details incomplete: {0} is required")]
    IncompleteGuestInfo(&'static str),

    #[error("order submission failed: {0}")]
    Submit(String),
}
