mod duuid;
mod share_kind;

pub use duuid::DUuid;
pub use share_kind::ShareKind;
