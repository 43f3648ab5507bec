pub mod availability;
pub mod calendar;
pub mod editor;
pub mod slots;
pub mod summary;

pub use availability::*;
pub use calendar::*;
pub use editor::*;
pub use slots::*;
pub use summary::*;
