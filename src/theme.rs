/// draw.io style declarations used for every emitted cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub root: &'static str,
    pub first_tier: &'static str,
    pub deeper: &'static str,
    pub callout: &'static str,
    pub connector: &'static str,
    pub callout_connector: &'static str,
}

impl Theme {
    /// Light-blue topic boxes with yellow sticky-note callouts.
    pub const fn xmind_blue() -> Self {
        Self {
            root: "rounded=1;whiteSpace=wrap;html=1;fillColor=#dae8fc;strokeColor=#6c8ebf;fontStyle=1;fontSize=14;",
            first_tier: "rounded=1;whiteSpace=wrap;html=1;fillColor=#dae8fc;strokeColor=#6c8ebf;fontSize=12;",
            deeper: "rounded=1;whiteSpace=wrap;html=1;fillColor=#dae8fc;strokeColor=#6c8ebf;fontSize=11;",
            callout: "shape=note;whiteSpace=wrap;html=1;fillColor=#fff2cc;strokeColor=#d6b656;fontSize=9;align=left;verticalAlign=top;spacing=8;spacingLeft=12;spacingRight=12;spacingTop=8;backgroundOutline=1;size=12;",
            connector: "edgeStyle=entityRelationEdgeStyle;rounded=1;orthogonalLoop=1;jettySize=auto;html=1;curved=1;strokeColor=#6c8ebf;strokeWidth=1;",
            callout_connector: "edgeStyle=none;rounded=1;orthogonalLoop=1;jettySize=auto;html=1;dashed=1;strokeColor=#d6b656;strokeWidth=1;",
        }
    }

    pub fn topic_style(&self, level: usize) -> &'static str {
        match level {
            0 => self.root,
            1 => self.first_tier,
            _ => self.deeper,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::xmind_blue()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declaration<'a>(style: &'a str, key: &str) -> Option<&'a str> {
        style
            .split(';')
            .filter_map(|decl| decl.split_once('='))
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    #[test]
    fn topic_levels_differ_only_in_font() {
        let theme = Theme::default();
        let styles = [theme.topic_style(0), theme.topic_style(1), theme.topic_style(7)];
        for style in styles {
            assert_eq!(declaration(style, "fillColor"), Some("#dae8fc"));
            assert_eq!(declaration(style, "strokeColor"), Some("#6c8ebf"));
        }
        assert_eq!(declaration(styles[0], "fontStyle"), Some("1"));
        assert_eq!(declaration(styles[0], "fontSize"), Some("14"));
        assert_eq!(declaration(styles[1], "fontSize"), Some("12"));
        assert_eq!(declaration(styles[2], "fontSize"), Some("11"));
        assert_eq!(theme.topic_style(2), theme.topic_style(9));
    }

    #[test]
    fn callout_connector_is_dashed() {
        let theme = Theme::default();
        assert_eq!(declaration(theme.callout_connector, "dashed"), Some("1"));
        assert_eq!(declaration(theme.connector, "dashed"), None);
        assert_eq!(declaration(theme.callout, "shape"), Some("note"));
    }
}
