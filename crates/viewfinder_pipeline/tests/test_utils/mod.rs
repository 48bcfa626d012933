//! Test utilities for pipeline tests.
//!
//! This module provides mock capabilities and canned model output.

pub mod fixtures;
pub mod mock_conversation;
pub mod mock_generator;
pub mod mock_images;

#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use mock_conversation::MockConversationSource;
#[allow(unused_imports)]
pub use mock_generator::{MockResponse, MockStructuredGenerator};
#[allow(unused_imports)]
pub use mock_images::{FAIL_MARKER, MemoryStorage, MockImageGenerator};
