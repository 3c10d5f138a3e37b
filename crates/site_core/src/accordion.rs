use serde::Serialize;
use shared::{domain::AccordionId, markup::AccordionMarkup};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccordionPanel {
    pub open: bool,
    /// Natural height of the content element, when the panel has one.
    pub content_height: Option<u32>,
    /// Current visible height limit; `None` until first set or when there is no content.
    pub max_height: Option<u32>,
}

/// Page-wide exclusive-open accordion set.
#[derive(Debug, Default)]
pub struct Accordions {
    panels: Vec<AccordionPanel>,
}

impl Accordions {
    pub fn init(markup: &[AccordionMarkup]) -> Self {
        Self {
            panels: markup
                .iter()
                .map(|panel| AccordionPanel {
                    open: panel.open,
                    content_height: panel.content_height,
                    max_height: None,
                })
                .collect(),
        }
    }

    pub fn panel(&self, id: AccordionId) -> Option<&AccordionPanel> {
        self.panels.get(id.index())
    }

    pub fn panels(&self) -> &[AccordionPanel] {
        &self.panels
    }

    pub fn open_panels(&self) -> Vec<AccordionId> {
        self.panels
            .iter()
            .enumerate()
            .filter(|(_, panel)| panel.open)
            .map(|(index, _)| AccordionId(index))
            .collect()
    }

    pub fn on_header_click(&mut self, id: AccordionId) {
        let Some(was_open) = self.panels.get(id.index()).map(|panel| panel.open) else {
            return;
        };

        for panel in &mut self.panels {
            panel.open = false;
            if panel.content_height.is_some() {
                panel.max_height = Some(0);
            }
        }

        if !was_open {
            let panel = &mut self.panels[id.index()];
            panel.open = true;
            if let Some(height) = panel.content_height {
                panel.max_height = Some(height);
            }
        }
        debug!(panel = id.index(), open = !was_open, "accordion toggled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accordions(count: usize) -> Accordions {
        Accordions::init(
            &(0..count)
                .map(|i| AccordionMarkup {
                    open: false,
                    content_height: Some(100 + i as u32 * 10),
                })
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn opening_one_closes_the_other_in_the_same_step() {
        let mut set = accordions(3);
        set.on_header_click(AccordionId(0));
        assert_eq!(set.open_panels(), vec![AccordionId(0)]);
        assert_eq!(set.panel(AccordionId(0)).and_then(|p| p.max_height), Some(100));

        set.on_header_click(AccordionId(2));
        assert_eq!(set.open_panels(), vec![AccordionId(2)]);
        assert_eq!(set.panel(AccordionId(0)).and_then(|p| p.max_height), Some(0));
        assert_eq!(set.panel(AccordionId(2)).and_then(|p| p.max_height), Some(120));
    }

    #[test]
    fn clicking_the_open_panel_closes_everything() {
        let mut set = accordions(2);
        set.on_header_click(AccordionId(1));
        set.on_header_click(AccordionId(1));
        assert!(set.open_panels().is_empty());
        assert!(set.panels().iter().all(|p| p.max_height == Some(0)));
    }

    #[test]
    fn markup_with_several_open_panels_collapses_on_first_click() {
        let mut set = Accordions::init(&[
            AccordionMarkup {
                open: true,
                content_height: Some(40),
            },
            AccordionMarkup {
                open: true,
                content_height: None,
            },
        ]);
        set.on_header_click(AccordionId(0));
        assert!(set.open_panels().is_empty());
        assert_eq!(set.panel(AccordionId(1)).and_then(|p| p.max_height), None);
    }

    #[test]
    fn at_most_one_panel_open_over_any_click_sequence() {
        let mut set = accordions(4);
        for id in [0, 1, 1, 3, 2, 2, 0, 3] {
            set.on_header_click(AccordionId(id));
            assert!(set.open_panels().len() <= 1);
        }
    }
}
