pub mod browser;
pub mod error;
pub mod extract;
pub mod orchestrate;
pub mod page;
pub mod probe;
pub mod scroll;

pub use browser::ChromePage;
pub use error::ScrapeError;
pub use orchestrate::{Orchestrator, ScrapeOptions};
pub use page::{AnchorInfo, DirectoryPage};
pub use probe::{is_broken, probe_client, ProbePolicy};
pub use scroll::ScrollConfig;
