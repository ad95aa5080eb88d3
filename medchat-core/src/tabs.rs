#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Chat,
    Config,
}

impl Tab {
    pub fn label(self) -> &'static str {
        match self {
            Tab::Chat => "chat",
            Tab::Config => "config",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabControl {
    pub tab: Tab,
    pub active: bool,
}

/// Two tab controls and the panel they select. Exactly one control is
/// active and exactly one panel is shown.
#[derive(Debug, Clone)]
pub struct TabBar {
    controls: [TabControl; 2],
    panel: Tab,
}

impl Default for TabBar {
    fn default() -> Self {
        Self {
            controls: [
                TabControl {
                    tab: Tab::Chat,
                    active: true,
                },
                TabControl {
                    tab: Tab::Config,
                    active: false,
                },
            ],
            panel: Tab::Chat,
        }
    }
}

impl TabBar {
    /// Activate the control the user picked and show its panel.
    pub fn activate(&mut self, control: Tab) {
        for c in self.controls.iter_mut() {
            c.active = c.tab == control;
        }
        self.panel = control;
    }

    pub fn active_panel(&self) -> Tab {
        self.panel
    }

    pub fn controls(&self) -> &[TabControl] {
        &self.controls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_control_active() {
        let mut bar = TabBar::default();
        assert_eq!(bar.active_panel(), Tab::Chat);

        bar.activate(Tab::Config);
        assert_eq!(bar.active_panel(), Tab::Config);
        let active: Vec<Tab> = bar.controls().iter().filter(|c| c.active).map(|c| c.tab).collect();
        assert_eq!(active, vec![Tab::Config]);

        bar.activate(Tab::Chat);
        let active: Vec<Tab> = bar.controls().iter().filter(|c| c.active).map(|c| c.tab).collect();
        assert_eq!(active, vec![Tab::Chat]);
    }
}
