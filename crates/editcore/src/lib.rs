// Editing engine exports

pub mod document;
pub mod key;
pub mod line_buffer;
pub mod mode;
pub mod session;
pub mod status;

pub use key::Key;
pub use line_buffer::LineBuffer;
pub use mode::{Command, Edit, Mode, Motion};
pub use session::{Action, EditorSession, Viewport, DEFAULT_FILENAME};
pub use status::{Notice, NoticeKind, StatusLine};
