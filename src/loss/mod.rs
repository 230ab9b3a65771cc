pub mod mse;
pub mod nll;
pub mod loss_kind;

pub use mse::MseLoss;
pub use nll::NllLoss;
pub use loss_kind::LossKind;
