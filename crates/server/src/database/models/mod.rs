mod file;
mod note;
mod session;
mod share_token;

pub use file::File;
pub use note::{Note, NoteSummary};
pub use session::Session;
pub use share_token::ShareToken;
