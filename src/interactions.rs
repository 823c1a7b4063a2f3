use crate::feeds::Photographer;
use std::collections::HashMap;

/// Per-item interaction flags for the current viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub liked: bool,
    pub comments: Vec<String>,
    pub comments_visible: bool,
}

/// The single active "hire" target.
///
/// `dialog_open` is only ever set together with `selected_item_id`, so an open
/// dialog always has a target. Closing the dialog leaves the id behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HireSelection {
    selected_item_id: Option<String>,
    dialog_open: bool,
}

impl HireSelection {
    pub fn selected_item_id(&self) -> Option<&str> {
        self.selected_item_id.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.dialog_open
    }
}

/// Likes, comments and hire selection for one feed session.
///
/// Items only get an entry in the state map once they are interacted with.
/// Every read treats a missing entry as [`InteractionState::default`].
#[derive(Debug, Clone, Default)]
pub struct InteractionTracker {
    states: HashMap<String, InteractionState>,
    draft: String,
    hire: HireSelection,
}

static DEFAULT_STATE: InteractionState = InteractionState {
    liked: false,
    comments: Vec::new(),
    comments_visible: false,
};

impl InteractionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, id: &str) -> &mut InteractionState {
        self.states.entry(id.to_string()).or_default()
    }

    pub fn state(&self, id: &str) -> &InteractionState {
        self.states.get(id).unwrap_or(&DEFAULT_STATE)
    }

    pub fn toggle_like(&mut self, id: &str) {
        let state = self.entry(id);
        state.liked = !state.liked;
        tracing::debug!(item = id, liked = state.liked, "toggled like");
    }

    pub fn toggle_comments_visible(&mut self, id: &str) {
        let state = self.entry(id);
        state.comments_visible = !state.comments_visible;
        tracing::debug!(item = id, visible = state.comments_visible, "toggled comments");
    }

    /// Appends `text` to the item's comments and clears the draft.
    ///
    /// Blank or whitespace-only text is dropped without touching any state.
    pub fn submit_comment(&mut self, id: &str, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        self.entry(id).comments.push(text.to_string());
        self.draft.clear();
        tracing::debug!(item = id, "comment added");
    }

    pub fn submit_draft(&mut self, id: &str) {
        let text = std::mem::take(&mut self.draft);
        self.submit_comment(id, &text);
        if text.trim().is_empty() {
            // nothing was submitted, so the draft stays as typed
            self.draft = text;
        }
    }

    pub fn select_for_hire(&mut self, id: &str) {
        self.hire.selected_item_id = Some(id.to_string());
        self.hire.dialog_open = true;
        tracing::debug!(item = id, "hire dialog opened");
    }

    pub fn close_hire_dialog(&mut self) {
        self.hire.dialog_open = false;
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.state(id).liked
    }

    pub fn comments(&self, id: &str) -> &[String] {
        &self.state(id).comments
    }

    pub fn comments_visible(&self, id: &str) -> bool {
        self.state(id).comments_visible
    }

    /// Like count to display: the fixture's base count plus the viewer's own like.
    pub fn effective_likes(&self, item: &Photographer) -> u64 {
        item.likes + u64::from(self.is_liked(&item.id))
    }

    pub fn hire(&self) -> &HireSelection {
        &self.hire
    }

    /// Resolves the open hire dialog's target. `None` while the dialog is closed.
    pub fn hire_target<'a>(&self, items: &'a [Photographer]) -> Option<&'a Photographer> {
        if !self.hire.dialog_open {
            return None;
        }
        let id = self.hire.selected_item_id.as_deref()?;
        items.iter().find(|p| p.id == id)
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn push_draft_char(&mut self, c: char) {
        self.draft.push(c);
    }

    pub fn pop_draft_char(&mut self) {
        self.draft.pop();
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::fixture::builtin_fixture;

    #[test]
    fn test_double_toggle_like_restores_count() {
        let fixture = builtin_fixture();
        let item = &fixture.photographers[0];
        assert_eq!(item.id, "1");
        assert_eq!(item.likes, 1234);

        let mut tracker = InteractionTracker::new();
        tracker.toggle_like("1");
        assert!(tracker.is_liked("1"));
        assert_eq!(tracker.effective_likes(item), 1235);

        tracker.toggle_like("1");
        assert!(!tracker.is_liked("1"));
        assert_eq!(tracker.effective_likes(item), 1234);
    }

    #[test]
    fn test_likes_are_per_item() {
        let mut tracker = InteractionTracker::new();
        tracker.toggle_like("1");
        assert!(tracker.is_liked("1"));
        assert!(!tracker.is_liked("2"));
    }

    #[test]
    fn test_blank_comments_are_ignored() {
        let mut tracker = InteractionTracker::new();
        tracker.submit_comment("1", "first");
        tracker.submit_comment("1", "");
        tracker.submit_comment("1", "   ");
        tracker.submit_comment("1", "\t\n");
        assert_eq!(tracker.comments("1").len(), 1);
        assert!(tracker.comments("2").is_empty());
    }

    #[test]
    fn test_submit_comment_appends_in_order() {
        let mut tracker = InteractionTracker::new();
        tracker.submit_comment("1", "love the light");
        tracker.submit_comment("1", "love the light");
        tracker.submit_comment("1", "nice shot");
        assert_eq!(
            tracker.comments("1"),
            ["love the light", "love the light", "nice shot"]
        );
    }

    #[test]
    fn test_submit_draft_clears_only_on_success() {
        let mut tracker = InteractionTracker::new();
        for c in "  ".chars() {
            tracker.push_draft_char(c);
        }
        tracker.submit_draft("1");
        assert_eq!(tracker.draft(), "  ");
        assert!(tracker.comments("1").is_empty());

        tracker.clear_draft();
        for c in "wow".chars() {
            tracker.push_draft_char(c);
        }
        tracker.pop_draft_char();
        tracker.push_draft_char('!');
        tracker.submit_draft("1");
        assert_eq!(tracker.draft(), "");
        assert_eq!(tracker.comments("1"), ["wo!"]);
    }

    #[test]
    fn test_comments_visible_without_comments() {
        let mut tracker = InteractionTracker::new();
        tracker.toggle_comments_visible("2");
        assert!(tracker.comments_visible("2"));
        assert!(tracker.comments("2").is_empty());

        tracker.toggle_comments_visible("2");
        assert!(!tracker.comments_visible("2"));
    }

    #[test]
    fn test_untouched_item_reads_defaults() {
        let tracker = InteractionTracker::new();
        assert_eq!(tracker.state("missing"), &InteractionState::default());
    }

    #[test]
    fn test_close_hire_dialog_keeps_selection() {
        let fixture = builtin_fixture();
        let mut tracker = InteractionTracker::new();
        assert!(tracker.hire_target(&fixture.photographers).is_none());

        tracker.select_for_hire("2");
        assert!(tracker.hire().is_open());
        assert_eq!(
            tracker.hire_target(&fixture.photographers).map(|p| p.name.as_str()),
            Some("Marcus Chen")
        );

        tracker.close_hire_dialog();
        assert!(!tracker.hire().is_open());
        assert_eq!(tracker.hire().selected_item_id(), Some("2"));
        assert!(tracker.hire_target(&fixture.photographers).is_none());
    }

    #[test]
    fn test_reselect_replaces_hire_target() {
        let mut tracker = InteractionTracker::new();
        tracker.select_for_hire("1");
        tracker.close_hire_dialog();
        tracker.select_for_hire("2");
        assert!(tracker.hire().is_open());
        assert_eq!(tracker.hire().selected_item_id(), Some("2"));
    }
}
