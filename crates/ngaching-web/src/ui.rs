use ngaching_core::SceneFrame;
use web_sys as web;

pub const BLESSING_ID: &str = "blessing";
pub const CHAOS_HINT_ID: &str = "chaos-hint";

/// Shows or hides the overlay elements, touching the DOM only on change.
#[derive(Default)]
pub struct UiGates {
    blessing: Option<bool>,
    chaos_hint: Option<bool>,
}

impl UiGates {
    pub fn apply(&mut self, document: &web::Document, frame: &SceneFrame<'_>) {
        sync(document, BLESSING_ID, &mut self.blessing, frame.show_blessing());
        sync(document, CHAOS_HINT_ID, &mut self.chaos_hint, frame.show_chaos_hint());
    }
}

fn sync(document: &web::Document, id: &str, shown: &mut Option<bool>, want: bool) {
    if *shown != Some(want) {
        crate::dom::set_visible(document, id, want);
        *shown = Some(want);
    }
}
