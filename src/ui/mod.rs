use iced::{
    widget::{button, column, text, Space},
    Element, Length,
};

use crate::domain::TriggerPhase;

/// Main view state
pub struct TriggerView {
    pub phase: TriggerPhase,
    pub control_visible: bool,
    pub busy_visible: bool,
    pub status_message: String,
}

impl Default for TriggerView {
    fn default() -> Self {
        Self {
            phase: TriggerPhase::Idle,
            control_visible: true,
            busy_visible: false,
            status_message: "Press Run to download the data".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum TriggerMessage {
    RunPressed,
}

impl TriggerView {
    pub fn is_requesting(&self) -> bool {
        self.phase == TriggerPhase::Requesting
    }

    /// Idle -> Requesting: hide the control, show the busy indicator.
    pub fn begin_request(&mut self) {
        self.phase = TriggerPhase::Requesting;
        self.control_visible = false;
        self.busy_visible = true;
        self.status_message = "Downloading...".to_string();
    }

    /// Requesting -> Idle, whatever the outcome.
    pub fn finish_request(&mut self, status_message: String) {
        self.phase = TriggerPhase::Idle;
        self.control_visible = true;
        self.busy_visible = false;
        self.status_message = status_message;
    }

    pub fn view(&self) -> Element<'_, TriggerMessage> {
        let mut content = column![
            text("Data Download").size(32),
            Space::new().height(Length::Fixed(20.0)),
            text(&self.status_message).size(14),
            Space::new().height(Length::Fixed(20.0)),
        ];

        if self.control_visible {
            content = content.push(
                button("Run")
                    .on_press_maybe((!self.is_requesting()).then_some(TriggerMessage::RunPressed))
                    .padding([10, 20]),
            );
        }

        if self.busy_visible {
            content = content.push(text("Working...").size(16));
        }

        content.padding(20).spacing(10).into()
    }
}
