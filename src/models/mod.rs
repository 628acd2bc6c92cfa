pub mod color;
pub mod contact;
pub mod location;
pub mod project;
pub mod response;
pub mod resume;
pub mod user;

pub use color::*;
pub use contact::*;
pub use location::*;
pub use project::*;
pub use response::*;
pub use resume::*;
pub use user::*;
