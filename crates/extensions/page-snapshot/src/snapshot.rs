//! [`PageAdapter`] implementation over a parsed snapshot.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, trace};

use replyforge_protocols::error::PageError;
use replyforge_protocols::{ElementHandle, PageAdapter, SyntheticEvent};

use crate::selectors::*;
use crate::tree::{Node, Tree};

/// How the simulated host editor reacts to input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotBehavior {
    /// A dispatched paste event inserts its payload.
    pub accept_paste: bool,
    /// Direct assignment changes the content. Rich-text editors ignore it.
    pub accept_assignment: bool,
    /// Every dispatch fails.
    pub fail_dispatch: bool,
}

impl Default for SnapshotBehavior {
    fn default() -> Self {
        Self {
            accept_paste: true,
            accept_assignment: false,
            fail_dispatch: false,
        }
    }
}

#[derive(Debug, Default)]
struct Interactions {
    focused: Option<ElementHandle>,
    assigned: HashMap<ElementHandle, String>,
    content: HashMap<ElementHandle, String>,
    events: Vec<(ElementHandle, SyntheticEvent)>,
}

/// A host page frozen at one moment.
pub struct SnapshotPage {
    tree: Tree,
    behavior: SnapshotBehavior,
    interactions: Mutex<Interactions>,
}

impl SnapshotPage {
    pub fn from_html(html: &str) -> Self {
        Self::with_behavior(html, SnapshotBehavior::default())
    }

    pub fn with_behavior(html: &str, behavior: SnapshotBehavior) -> Self {
        let tree = Tree::parse(html);
        debug!("Parsed page snapshot with {} nodes", tree.len());
        Self {
            tree,
            behavior,
            interactions: Mutex::new(Interactions::default()),
        }
    }

    /// First element carrying `data-testid="{test_id}"`.
    pub fn find_by_test_id(&self, test_id: &str) -> Option<ElementHandle> {
        self.tree.find(|n| has_test_id(n, test_id)).map(handle)
    }

    /// First element carrying `id="{id}"`.
    pub fn find_by_id(&self, id: &str) -> Option<ElementHandle> {
        self.tree.find(|n| n.attr("id") == Some(id)).map(handle)
    }

    pub fn focused(&self) -> Option<ElementHandle> {
        self.interactions.lock().focused
    }

    pub fn assigned_text(&self, node: ElementHandle) -> Option<String> {
        self.interactions.lock().assigned.get(&node).cloned()
    }

    /// Text the simulated editor holds at `node`.
    pub fn content(&self, node: ElementHandle) -> Option<String> {
        self.interactions.lock().content.get(&node).cloned()
    }

    /// Every dispatched event, oldest first.
    pub fn events(&self) -> Vec<(ElementHandle, SyntheticEvent)> {
        self.interactions.lock().events.clone()
    }

    fn index(&self, node: ElementHandle) -> Result<usize, PageError> {
        let index = usize::try_from(node.0).map_err(|_| PageError::Detached(node))?;
        match self.tree.get(index) {
            Some(n) if n.tag().is_some() => Ok(index),
            _ => Err(PageError::Detached(node)),
        }
    }
}

fn handle(index: usize) -> ElementHandle {
    ElementHandle(index as u64)
}

fn has_test_id(node: &Node, test_id: &str) -> bool {
    node.attr("data-testid") == Some(test_id)
}

fn is_post(node: &Node) -> bool {
    node.tag() == Some(POST_TAG) && has_test_id(node, POST_TEST_ID)
}

#[async_trait]
impl PageAdapter for SnapshotPage {
    async fn closest_post(&self, target: ElementHandle) -> Result<Option<ElementHandle>, PageError> {
        let index = self.index(target)?;
        Ok(self
            .tree
            .ancestors_inclusive(index)
            .into_iter()
            .find(|&i| self.tree.get(i).is_some_and(is_post))
            .map(handle))
    }

    async fn compose_surface(&self) -> Result<Option<ElementHandle>, PageError> {
        Ok(self.find_by_test_id(COMPOSE_SURFACE_TEST_ID))
    }

    async fn editor_in(&self, surface: ElementHandle) -> Result<Option<ElementHandle>, PageError> {
        let index = self.index(surface)?;
        Ok(self
            .tree
            .find_descendant(index, |n| has_test_id(n, EDITOR_TEST_ID))
            .map(handle))
    }

    async fn editable_in(&self, editor: ElementHandle) -> Result<Option<ElementHandle>, PageError> {
        let index = self.index(editor)?;
        let editable = self
            .tree
            .find_descendant(index, |n| n.attr("role") == Some("textbox"))
            .or_else(|| {
                self.tree
                    .find_descendant(index, |n| n.attr("contenteditable") == Some("true"))
            })
            .unwrap_or(index);
        Ok(Some(handle(editable)))
    }

    async fn nearest_enclosing_post(
        &self,
        from: ElementHandle,
        max_depth: usize,
    ) -> Result<Option<ElementHandle>, PageError> {
        let mut container = self.index(from)?;
        for _ in 0..max_depth {
            let Some(parent) = self.tree.parent(container) else {
                break;
            };
            container = parent;
            if let Some(post) = self.tree.find_descendant(container, is_post) {
                trace!("Post found inside ancestor {}", container);
                return Ok(Some(handle(post)));
            }
        }
        Ok(None)
    }

    async fn first_post(&self) -> Result<Option<ElementHandle>, PageError> {
        Ok(self.tree.find(is_post).map(handle))
    }

    async fn post_text(&self, post: ElementHandle) -> Result<Option<String>, PageError> {
        let index = self.index(post)?;
        Ok(self
            .tree
            .find_descendant(index, |n| has_test_id(n, POST_TEXT_TEST_ID))
            .map(|i| self.tree.inner_text(i)))
    }

    async fn author_block_text(&self, post: ElementHandle) -> Result<Option<String>, PageError> {
        let index = self.index(post)?;
        Ok(self
            .tree
            .find_descendant(index, |n| has_test_id(n, AUTHOR_TEST_ID))
            .map(|i| self.tree.inner_text(i)))
    }

    async fn focus(&self, node: ElementHandle) -> Result<(), PageError> {
        self.index(node)?;
        self.interactions.lock().focused = Some(node);
        Ok(())
    }

    async fn assign_text(&self, node: ElementHandle, text: &str) -> Result<(), PageError> {
        self.index(node)?;
        let mut interactions = self.interactions.lock();
        interactions.assigned.insert(node, text.to_string());
        if self.behavior.accept_assignment {
            interactions.content.insert(node, text.to_string());
        }
        Ok(())
    }

    async fn dispatch(&self, node: ElementHandle, event: SyntheticEvent) -> Result<(), PageError> {
        self.index(node)?;
        if self.behavior.fail_dispatch {
            return Err(PageError::Dispatch(format!("{:?} rejected by page", event)));
        }

        let mut interactions = self.interactions.lock();
        if let SyntheticEvent::Paste { text } = &event {
            if self.behavior.accept_paste {
                interactions.content.entry(node).or_default().push_str(text);
            }
        }
        interactions.events.push((node, event));
        Ok(())
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
