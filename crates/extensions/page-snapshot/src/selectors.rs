//! Attribute values identifying the host page's structures.

/// `data-testid` of a rendered post (on an `article` element).
pub const POST_TEST_ID: &str = "tweet";

pub const POST_TAG: &str = "article";

/// `data-testid` of the reply compose surface.
pub const COMPOSE_SURFACE_TEST_ID: &str = "tweetTextarea_0RichTextInputContainer";

/// `data-testid` of the rich-text editor inside the compose surface.
pub const EDITOR_TEST_ID: &str = "tweetTextarea_0";

/// `data-testid` of a post's body text.
pub const POST_TEXT_TEST_ID: &str = "tweetText";

/// `data-testid` of a post's identity block.
pub const AUTHOR_TEST_ID: &str = "User-Name";
