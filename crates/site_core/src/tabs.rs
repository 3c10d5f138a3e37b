use serde::Serialize;
use shared::{domain::TabGroupId, markup::TabGroupMarkup};
use tracing::debug;

#[derive(Debug, Clone, Serialize)]
pub struct TabGroup {
    triggers: Vec<String>,
    panels: Vec<String>,
    active_trigger: Option<usize>,
    active_panel: Option<usize>,
}

impl TabGroup {
    fn from_markup(markup: &TabGroupMarkup) -> Self {
        Self {
            triggers: markup.tabs.iter().map(|tab| tab.tab.clone()).collect(),
            panels: markup.panels.iter().map(|panel| panel.id.clone()).collect(),
            active_trigger: markup.tabs.iter().position(|tab| tab.active),
            active_panel: markup.panels.iter().position(|panel| panel.active),
        }
    }

    pub fn active_tab(&self) -> Option<&str> {
        self.active_trigger
            .and_then(|index| self.triggers.get(index))
            .map(String::as_str)
    }

    pub fn active_panel(&self) -> Option<&str> {
        self.active_panel
            .and_then(|index| self.panels.get(index))
            .map(String::as_str)
    }

    /// Deactivates every trigger and panel in this group, then activates the
    /// clicked trigger and the `<tab>-content` panel when one exists.
    fn activate(&mut self, index: usize) -> bool {
        let Some(tab) = self.triggers.get(index) else {
            return false;
        };
        let panel_id = format!("{tab}-content");
        self.active_trigger = Some(index);
        self.active_panel = self.panels.iter().position(|id| *id == panel_id);
        if self.active_panel.is_none() {
            debug!(tab = %tab, "no panel matches tab");
        }
        true
    }
}

#[derive(Debug, Default)]
pub struct TabSystem {
    groups: Vec<TabGroup>,
}

impl TabSystem {
    pub fn init(markup: &[TabGroupMarkup]) -> Self {
        Self {
            groups: markup.iter().map(TabGroup::from_markup).collect(),
        }
    }

    pub fn group(&self, id: TabGroupId) -> Option<&TabGroup> {
        self.groups.get(id.index())
    }

    pub fn groups(&self) -> &[TabGroup] {
        &self.groups
    }

    pub fn on_tab_click(&mut self, group: TabGroupId, index: usize) {
        let Some(tabs) = self.groups.get_mut(group.index()) else {
            return;
        };
        if tabs.activate(index) {
            debug!(group = group.index(), tab = index, "tab activated");
        }
    }
}
