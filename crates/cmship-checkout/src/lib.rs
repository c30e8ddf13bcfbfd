//! Checkout-side state for the storefront: cart, shipping-location flow,
//! order submission and receipts.

pub mod cart;
pub mod error;
pub mod flow;
pub mod format;
pub mod order;
pub mod receipt;
pub mod store;

pub use cart::{Cart, CartItem, CartStore, Product};
pub use error::{CheckoutError, FlowError};
pub use flow::{CheckoutFlow, CheckoutStage, StageKind};
pub use format::format_xaf;
pub use order::{
    checkout, Customer, GuestInfo, InMemoryOrderSubmitter, OrderDraft, OrderLine, OrderSubmitter,
    OrderSummary, PaymentDetails, PaymentMethod, SubmittedOrder,
};
pub use receipt::{render_receipt, STORE_NAME};
pub use store::StateContainer;
