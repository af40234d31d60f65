use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use lazyload::{BoundingBox, CandidateId, ClientSize, Document, EventKind, EventSource};

/// Class that marks an element for deferred loading.
pub const CANDIDATE_CLASS: &str = "lazyload-img";
/// Attribute holding the real resource URL until the element is loaded.
pub const DEFERRED_SOURCE_ATTR: &str = "data-src";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListenerId(pub u64);

/// An element's box in document coordinates (independent of scrolling).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DocumentRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageElement {
    pub rect: DocumentRect,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub src: Option<String>,
    /// Set once the resource in `src` failed to load.
    pub failed: bool,
}

impl PageElement {
    pub fn new(rect: DocumentRect) -> Self {
        Self {
            rect,
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// An in-memory page: a scrollable document, a window client area and an event registry.
///
/// Useful for tests, demos and headless pipelines that want real lazy-loading decisions
/// without a browser.
#[derive(Clone, Debug)]
pub struct SimulatedPage {
    elements: Vec<PageElement>,
    client: ClientSize,
    scroll_x: f64,
    scroll_y: f64,
    geometry: bool,
    listeners: BTreeMap<ListenerId, EventKind>,
    next_listener: u64,
    watched: BTreeMap<ElementId, CandidateId>,
}

impl SimulatedPage {
    pub fn new(client_width: f64, client_height: f64) -> Self {
        Self {
            elements: Vec::new(),
            client: ClientSize::new(client_width, client_height),
            scroll_x: 0.0,
            scroll_y: 0.0,
            geometry: true,
            listeners: BTreeMap::new(),
            next_listener: 0,
            watched: BTreeMap::new(),
        }
    }

    /// Simulates a runtime that cannot report element geometry.
    pub fn with_geometry_support(mut self, supported: bool) -> Self {
        self.geometry = supported;
        self
    }

    pub fn add_element(&mut self, element: PageElement) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    /// Adds a lazily loaded image following the `lazyload-img` / `data-src` convention.
    pub fn add_image(&mut self, rect: DocumentRect, source: &str) -> ElementId {
        self.add_element(
            PageElement::new(rect)
                .with_class(CANDIDATE_CLASS)
                .with_attribute(DEFERRED_SOURCE_ATTR, source),
        )
    }

    /// Elements carrying [`CANDIDATE_CLASS`], in document order.
    pub fn candidates(&self) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, el)| el.has_class(CANDIDATE_CLASS))
            .map(|(i, _)| ElementId(i))
            .collect()
    }

    pub fn element(&self, id: ElementId) -> Option<&PageElement> {
        self.elements.get(id.0)
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.element(id)?.attributes.get(name).map(String::as_str)
    }

    pub fn src(&self, id: ElementId) -> Option<&str> {
        self.element(id)?.src.as_deref()
    }

    pub fn is_loaded(&self, id: ElementId) -> bool {
        self.src(id).is_some()
    }

    pub fn is_failed(&self, id: ElementId) -> bool {
        self.element(id).is_some_and(|el| el.failed)
    }

    pub fn scroll_offset(&self) -> (f64, f64) {
        (self.scroll_x, self.scroll_y)
    }

    pub fn scroll_to(&mut self, x: f64, y: f64) {
        self.scroll_x = x;
        self.scroll_y = y;
    }

    pub fn resize(&mut self, client_width: f64, client_height: f64) {
        self.client = ClientSize::new(client_width, client_height);
    }

    pub fn has_listener(&self, event: EventKind) -> bool {
        self.listeners.values().any(|&kind| kind == event)
    }

    pub fn active_listeners(&self) -> usize {
        self.listeners.len()
    }

    /// Marks every loaded element whose `src` equals `source` as failed.
    ///
    /// Returns the candidate ids registered through the failure observer that have not been
    /// reported yet, for reporting back to the session.
    pub fn fail_resource(&mut self, source: &str) -> Vec<CandidateId> {
        let mut failed = Vec::new();
        for (i, el) in self.elements.iter_mut().enumerate() {
            if el.src.as_deref() != Some(source) {
                continue;
            }
            el.failed = true;
            if let Some(id) = self.watched.remove(&ElementId(i)) {
                failed.push(id);
            }
        }
        failed
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut PageElement> {
        self.elements.get_mut(id.0)
    }
}

impl Document for SimulatedPage {
    type Candidate = ElementId;

    fn client_size(&self) -> ClientSize {
        self.client
    }

    fn bounding_box(&self, candidate: &ElementId) -> Option<BoundingBox> {
        if !self.geometry {
            return None;
        }
        // Unknown ids sit at the origin: they qualify at once and settle without a source.
        let Some(el) = self.element(*candidate) else {
            return Some(BoundingBox::new(0.0, 0.0, 1.0, 1.0));
        };
        let rect = el.rect;
        Some(BoundingBox::new(
            rect.y - self.scroll_y,
            rect.x - self.scroll_x,
            rect.height,
            rect.width,
        ))
    }

    fn deferred_source(&self, candidate: &ElementId) -> Option<String> {
        self.attribute(*candidate, DEFERRED_SOURCE_ATTR)
            .map(ToString::to_string)
    }

    fn clear_deferred_source(&mut self, candidate: &ElementId) {
        if let Some(el) = self.element_mut(*candidate) {
            el.attributes.remove(DEFERRED_SOURCE_ATTR);
        }
    }

    fn assign_source(&mut self, candidate: &ElementId, source: &str) {
        if let Some(el) = self.element_mut(*candidate) {
            el.src = Some(source.to_string());
        }
    }

    fn observe_failure(&mut self, candidate: &ElementId, id: CandidateId) {
        self.watched.insert(*candidate, id);
    }
}

impl EventSource for SimulatedPage {
    type Subscription = ListenerId;

    fn subscribe(&mut self, event: EventKind) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.listeners.insert(id, event);
        id
    }

    fn unsubscribe(&mut self, subscription: ListenerId) {
        self.listeners.remove(&subscription);
    }
}
