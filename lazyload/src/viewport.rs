use crate::host::Document;
use crate::{BoundingBox, CandidateId, ClientSize, LazyLoadError, Margins};

/// The document's client area grown by the configured margins.
///
/// Rebuilt for every evaluation; geometry is never cached between passes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub client: ClientSize,
    pub margins: Margins,
}

impl Viewport {
    pub fn new(client: ClientSize, margins: Margins) -> Self {
        Self { client, margins }
    }

    pub fn from_document<D: Document + ?Sized>(doc: &D, margins: Margins) -> Self {
        Self::new(doc.client_size(), margins)
    }

    /// Coarse axis-aligned test: does `rect` reach into the (margin-expanded) viewport?
    ///
    /// Upper bounds are half-open, so a box starting exactly at `client.height + margin` is out.
    pub fn contains(&self, rect: &BoundingBox) -> bool {
        overlaps(
            rect.top,
            rect.height,
            self.client.height,
            self.margins.vertical,
        ) && overlaps(
            rect.left,
            rect.width,
            self.client.width,
            self.margins.horizontal,
        )
    }
}

fn overlaps(start: f64, extent: f64, client: f64, margin: f64) -> bool {
    // A zero-sized axis only reaches the viewport through a positive margin.
    if extent <= 0.0 && margin <= 0.0 {
        return false;
    }
    let extent = extent.max(0.0);
    start > -extent - margin && start < client + margin
}

/// Whether `candidate` currently qualifies for loading.
///
/// Fails with [`LazyLoadError::Capability`] when the host cannot report geometry; the caller
/// decides what to do about it.
pub fn is_in_viewport<D: Document + ?Sized>(
    doc: &D,
    candidate: &D::Candidate,
    id: CandidateId,
    margins: Margins,
) -> Result<bool, LazyLoadError> {
    let rect = doc
        .bounding_box(candidate)
        .ok_or(LazyLoadError::Capability { id })?;
    Ok(Viewport::from_document(doc, margins).contains(&rect))
}
