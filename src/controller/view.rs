use crate::controller::types::SelectedFile;

/// Page elements the controllers drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    FileNameLabel,
    DropZone,
    SubmitButton,
    ScanOptIn,
    LoadingIndicator,
    ResultsContainer,
    ResultContent,
    ThemeToggle,
    ThemeStylesheet,
}

impl Element {
    pub fn id(self) -> &'static str {
        match self {
            Element::FileNameLabel => "fileNameDisplay",
            Element::DropZone => "dropZone",
            Element::SubmitButton => "submitButton",
            Element::ScanOptIn => "virustotal",
            Element::LoadingIndicator => "loadingIndicator",
            Element::ResultsContainer => "resultsContainer",
            Element::ResultContent => "resultContent",
            Element::ThemeToggle => "theme-toggle-link",
            Element::ThemeStylesheet => "current-theme",
        }
    }
}

/// Rendering surface capability set.
///
/// `set_text` takes untrusted text and the view is responsible for
/// escaping it. `set_html` takes markup that has already been built from
/// escaped parts by the renderer.
pub trait View: Send + Sync {
    fn set_text(&self, element: Element, text: &str);
    fn set_html(&self, element: Element, markup: String);
    fn set_visible(&self, element: Element, visible: bool);
    fn set_enabled(&self, element: Element, enabled: bool);
    fn set_class(&self, element: Element, class: &str, on: bool);
    fn set_href(&self, element: Element, href: &str);
    fn href(&self, element: Element) -> Option<String>;
}

/// Input events the upload controller reacts to.
#[derive(Debug, Clone)]
pub enum UiEvent {
    FilePicked(SelectedFile),
    DragEnter,
    DragOver,
    DragLeave,
    /// `None` when the drop carried no file.
    Drop(Option<SelectedFile>),
    ScanToggled(bool),
    Submit,
}
