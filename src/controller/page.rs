use crate::assets::{LIGHT_STYLESHEET, PAGE_TEMPLATE};
use crate::controller::upload::SCAN_CHECKED_CLASS;
use crate::controller::view::{Element, View};
use crate::render::escape::escape_html;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Clone, Default)]
struct ElementState {
    text: Option<String>,
    html: Option<String>,
    visible: Option<bool>,
    enabled: Option<bool>,
    href: Option<String>,
    classes: BTreeSet<String>,
}

/// In-memory page document. Elements are visible and enabled until told
/// otherwise.
#[derive(Debug)]
pub struct PageView {
    elements: RwLock<BTreeMap<Element, ElementState>>,
}

impl Default for PageView {
    fn default() -> Self {
        Self::new()
    }
}

impl PageView {
    pub fn new() -> Self {
        let mut elements = BTreeMap::new();
        elements.insert(
            Element::ThemeStylesheet,
            ElementState {
                href: Some(LIGHT_STYLESHEET.to_string()),
                ..Default::default()
            },
        );
        Self {
            elements: RwLock::new(elements),
        }
    }

    fn read<T>(&self, element: Element, f: impl FnOnce(&ElementState) -> T) -> Option<T> {
        let elements = self.elements.read().unwrap_or_else(PoisonError::into_inner);
        elements.get(&element).map(f)
    }

    fn write(&self, element: Element, f: impl FnOnce(&mut ElementState)) {
        let mut elements = self.elements.write().unwrap_or_else(PoisonError::into_inner);
        f(elements.entry(element).or_default());
    }

    pub fn text(&self, element: Element) -> Option<String> {
        self.read(element, |e| e.text.clone()).flatten()
    }

    pub fn html(&self, element: Element) -> Option<String> {
        self.read(element, |e| e.html.clone()).flatten()
    }

    pub fn is_visible(&self, element: Element) -> bool {
        self.read(element, |e| e.visible.unwrap_or(true))
            .unwrap_or(true)
    }

    pub fn is_enabled(&self, element: Element) -> bool {
        self.read(element, |e| e.enabled.unwrap_or(true))
            .unwrap_or(true)
    }

    pub fn has_class(&self, element: Element, class: &str) -> bool {
        self.read(element, |e| e.classes.contains(class))
            .unwrap_or(false)
    }

    fn class_attr(&self, element: Element) -> String {
        let classes = self
            .read(element, |e| e.classes.iter().cloned().collect::<Vec<_>>())
            .unwrap_or_default();
        escape_html(&classes.join(" "))
    }

    /// Standalone HTML page reflecting the current element state.
    pub fn render_page(&self) -> String {
        let flag = |on: bool, attr: &'static str| (if on { attr } else { "" }).to_string();

        let mut slots = BTreeMap::new();
        slots.insert(
            "stylesheet",
            escape_html(
                &self
                    .href(Element::ThemeStylesheet)
                    .unwrap_or_else(|| LIGHT_STYLESHEET.to_string()),
            ),
        );
        slots.insert(
            "theme_label",
            escape_html(&self.text(Element::ThemeToggle).unwrap_or_default()),
        );
        slots.insert("drop_zone_class", self.class_attr(Element::DropZone));
        slots.insert("file_label_class", self.class_attr(Element::FileNameLabel));
        slots.insert(
            "file_label",
            escape_html(&self.text(Element::FileNameLabel).unwrap_or_default()),
        );
        slots.insert(
            "scan_checked",
            flag(self.has_class(Element::ScanOptIn, SCAN_CHECKED_CLASS), " checked"),
        );
        slots.insert(
            "submit_disabled",
            flag(!self.is_enabled(Element::SubmitButton), " disabled"),
        );
        slots.insert(
            "loading_hidden",
            flag(!self.is_visible(Element::LoadingIndicator), " hidden"),
        );
        slots.insert(
            "results_hidden",
            flag(!self.is_visible(Element::ResultsContainer), " hidden"),
        );
        slots.insert(
            "result_content",
            self.html(Element::ResultContent).unwrap_or_default(),
        );

        fill_template(PAGE_TEMPLATE, &slots)
    }
}

/// Replace each `{{name}}` in `template` with its slot value in a single
/// pass. Inserted values are never scanned again; unknown names are kept.
fn fill_template(template: &str, slots: &BTreeMap<&str, String>) -> String {
    let mut out = String::with_capacity(template.len() + 1024);
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        match after.find("}}") {
            Some(close) => {
                let name = &after[..close];
                match slots.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(name);
                        out.push_str("}}");
                    }
                }
                rest = &after[close + 2..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

impl View for PageView {
    fn set_text(&self, element: Element, text: &str) {
        self.write(element, |e| {
            e.text = Some(text.to_string());
            e.html = None;
        });
    }

    fn set_html(&self, element: Element, markup: String) {
        self.write(element, |e| {
            e.html = Some(markup);
            e.text = None;
        });
    }

    fn set_visible(&self, element: Element, visible: bool) {
        self.write(element, |e| e.visible = Some(visible));
    }

    fn set_enabled(&self, element: Element, enabled: bool) {
        self.write(element, |e| e.enabled = Some(enabled));
    }

    fn set_class(&self, element: Element, class: &str, on: bool) {
        self.write(element, |e| {
            if on {
                e.classes.insert(class.to_string());
            } else {
                e.classes.remove(class);
            }
        });
    }

    fn set_href(&self, element: Element, href: &str) {
        self.write(element, |e| e.href = Some(href.to_string()));
    }

    fn href(&self, element: Element) -> Option<String> {
        self.read(element, |e| e.href.clone()).flatten()
    }
}
