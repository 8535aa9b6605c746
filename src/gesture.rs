//! Click and drag recognition for the language switch.
//!
//! Mouse and touch input are reduced to horizontal positions. A drag is a
//! directional commit rather than a slider: once the pointer has moved past
//! the threshold toward the other language, that language is chosen and
//! the rest of the gesture is ignored.

use crate::i18n::Language;

/// How a press on the slider ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerRelease {
    /// Mouse button released over the switch; the browser follows up with a click
    MouseOnSwitch,

    /// Mouse button released somewhere else on the page
    MouseElsewhere,

    /// Touch end; no click is synthesized after a moving touch
    Touch,
}

impl PointerRelease {
    fn followed_by_click(self) -> bool {
        matches!(self, PointerRelease::MouseOnSwitch)
    }
}

/// Transient state of one pointer gesture on the switch slider.
#[derive(Debug, Clone)]
pub struct DragGesture {
    threshold: f64,
    pressed: bool,
    is_dragging: bool,
    start_x: f64,
    current_x: f64,
    /// Set when the gesture travelled past the threshold and was released
    /// with a mouse over the switch; only the click that follows is swallowed.
    swallow_click: bool,
}

impl DragGesture {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            pressed: false,
            is_dragging: false,
            start_x: 0.0,
            current_x: 0.0,
            swallow_click: false,
        }
    }

    /// Mouse down / touch start on the slider.
    pub fn pointer_down(&mut self, x: f64) {
        self.pressed = true;
        self.is_dragging = true;
        self.start_x = x;
        self.current_x = x;
        self.swallow_click = false;
    }

    /// Mouse / touch move anywhere on the page.
    ///
    /// Returns the language to switch to when the movement commits one.
    pub fn pointer_move(&mut self, x: f64, current: Language) -> Option<Language> {
        if !self.is_dragging {
            return None;
        }

        self.current_x = x;
        let diff = self.current_x - self.start_x;
        if diff.abs() <= self.threshold {
            return None;
        }

        self.swallow_click = true;
        let target = match current {
            Language::Vietnamese if diff > 0.0 => Some(Language::English),
            Language::English if diff < 0.0 => Some(Language::Vietnamese),
            _ => None,
        };

        if target.is_some() {
            self.is_dragging = false;
        }
        target
    }

    /// Mouse up / touch end. Returns `true` if a gesture was in progress.
    pub fn pointer_up(&mut self, release: PointerRelease) -> bool {
        let was_pressed = self.pressed;
        self.pressed = false;
        self.is_dragging = false;
        self.swallow_click = self.swallow_click && release.followed_by_click();
        was_pressed
    }

    /// Click on the switch. Returns `true` if it should toggle the language.
    pub fn click(&mut self) -> bool {
        if self.is_dragging {
            return false;
        }
        if self.swallow_click {
            self.swallow_click = false;
            return false;
        }
        true
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn start_x(&self) -> f64 {
        self.start_x
    }

    pub fn current_x(&self) -> f64 {
        self.current_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gesture() -> DragGesture {
        DragGesture::new(20.0)
    }

    // ==================== Drag Tests ====================

    #[test]
    fn test_right_drag_from_vietnamese_commits_english_once() {
        let mut g = gesture();
        g.pointer_down(100.0);

        assert_eq!(g.pointer_move(110.0, Language::Vietnamese), None);
        assert_eq!(g.pointer_move(125.0, Language::Vietnamese), Some(Language::English));
        assert!(!g.is_dragging());

        // Remainder of the gesture changes nothing, even moving back.
        assert_eq!(g.pointer_move(140.0, Language::English), None);
        assert_eq!(g.pointer_move(60.0, Language::English), None);
        assert!(g.pointer_up(PointerRelease::MouseOnSwitch));
        assert!(!g.click());
    }

    #[test]
    fn test_left_drag_from_english_commits_vietnamese() {
        let mut g = gesture();
        g.pointer_down(100.0);
        assert_eq!(g.pointer_move(75.0, Language::English), Some(Language::Vietnamese));
    }

    #[test]
    fn test_drag_toward_current_language_does_nothing() {
        let mut g = gesture();
        g.pointer_down(100.0);
        assert_eq!(g.pointer_move(50.0, Language::Vietnamese), None);
        assert!(g.is_dragging());
        assert_eq!(g.pointer_move(200.0, Language::English), None);
        g.pointer_up(PointerRelease::MouseOnSwitch);
        assert!(!g.click());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut g = gesture();
        g.pointer_down(0.0);
        assert_eq!(g.pointer_move(20.0, Language::Vietnamese), None);
        assert_eq!(g.pointer_move(20.5, Language::Vietnamese), Some(Language::English));
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mut g = gesture();
        assert_eq!(g.pointer_move(500.0, Language::Vietnamese), None);
        assert_eq!(g.current_x(), 0.0);
    }

    #[test]
    fn test_tracks_positions() {
        let mut g = gesture();
        g.pointer_down(10.0);
        g.pointer_move(15.0, Language::Vietnamese);
        assert_eq!(g.start_x(), 10.0);
        assert_eq!(g.current_x(), 15.0);
    }

    // ==================== Click Tests ====================

    #[test]
    fn test_plain_click_toggles() {
        let mut g = gesture();
        assert!(g.click());
    }

    #[test]
    fn test_press_release_click_toggles() {
        let mut g = gesture();
        g.pointer_down(50.0);
        g.pointer_move(55.0, Language::Vietnamese);
        assert!(g.pointer_up(PointerRelease::MouseOnSwitch));
        assert!(g.click());
    }

    #[test]
    fn test_click_during_drag_is_ignored() {
        let mut g = gesture();
        g.pointer_down(50.0);
        assert!(!g.click());
    }

    #[test]
    fn test_swallowed_click_only_once() {
        let mut g = gesture();
        g.pointer_down(0.0);
        g.pointer_move(30.0, Language::Vietnamese);
        g.pointer_up(PointerRelease::MouseOnSwitch);
        assert!(!g.click());
        assert!(g.click());
    }

    #[test]
    fn test_new_press_clears_swallowed_click() {
        let mut g = gesture();
        g.pointer_down(0.0);
        g.pointer_move(30.0, Language::Vietnamese);
        g.pointer_up(PointerRelease::MouseOnSwitch);

        g.pointer_down(0.0);
        g.pointer_up(PointerRelease::MouseOnSwitch);
        assert!(g.click());
    }

    #[test]
    fn test_touch_drag_does_not_swallow_next_click() {
        let mut g = gesture();
        g.pointer_down(0.0);
        assert_eq!(g.pointer_move(30.0, Language::Vietnamese), Some(Language::English));
        assert!(g.pointer_up(PointerRelease::Touch));
        assert!(g.click());
    }

    #[test]
    fn test_mouse_released_off_switch_does_not_swallow_next_click() {
        let mut g = gesture();
        g.pointer_down(0.0);
        assert_eq!(g.pointer_move(30.0, Language::Vietnamese), Some(Language::English));
        assert!(g.pointer_up(PointerRelease::MouseElsewhere));
        assert!(g.click());
    }

    #[test]
    fn test_pointer_up_without_press() {
        let mut g = gesture();
        assert!(!g.pointer_up(PointerRelease::MouseOnSwitch));
    }
}
