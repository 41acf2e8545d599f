//! Data model types.
//!
//! Two layers live here: the canonical resume data handed to the engine
//! ([`ResumeDocument`] and its parts) and the format-agnostic intermediate
//! representation ([`IntermediateDocument`]) that bridges rendering and
//! exporting.

mod block;
mod document;
pub(crate) mod paragraph;
mod period;
mod resource;
mod resume;

pub use block::{Block, BulletList, Field, Heading, KeyValueRow};
pub use document::{Degradation, IntermediateDocument, OmissionReason, RenderHints};
pub use paragraph::{plain_text, Paragraph, TextRun, TextStyle};
pub use period::{Period, PeriodPoint, PresentMarker};
pub use resource::{ImageRef, QrMatrix, DEFAULT_IMAGE_SIZE_PT};
pub use resume::{
    EducationEntry, ExperienceEntry, Identity, ProfileLink, ResumeDocument, ResumeOptions,
    SkillGroup,
};
