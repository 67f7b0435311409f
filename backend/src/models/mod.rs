pub mod course;
pub mod page;

pub use course::{Course, CourseChanges, CourseStatus, NewCourse};
pub use page::{Page, PageMeta};
