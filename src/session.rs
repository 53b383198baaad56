/// Try-on selection state.
///
/// The front end's mutable state — the person photo, which garment is picked
/// per category, the processing flag — lives in one serializable container
/// with plain transition methods, so selection rules can be tested without a
/// rendering environment.
use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Garment};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TryOnSession {
    /// Data URL of the chosen person photo.
    pub person_image: Option<String>,
    /// One slot per category, indexed in `Category::ALL` order.
    selected: [Option<Garment>; 4],
    pub processing: bool,
}

impl TryOnSession {
    pub fn new() -> Self {
        TryOnSession::default()
    }

    fn slot(category: Category) -> usize {
        Category::ALL
            .iter()
            .position(|c| *c == category)
            .expect("category is one of Category::ALL")
    }

    /// Selects the garment into its category slot.  Toggling the garment
    /// that is already selected clears the slot; at most one garment per
    /// category holds by construction.
    pub fn toggle(&mut self, garment: Garment) {
        let i = Self::slot(garment.category);
        match &self.selected[i] {
            Some(current) if current.id == garment.id => self.selected[i] = None,
            _ => self.selected[i] = Some(garment),
        }
    }

    pub fn clear_category(&mut self, category: Category) {
        self.selected[Self::slot(category)] = None;
    }

    pub fn selected_in(&self, category: Category) -> Option<&Garment> {
        self.selected[Self::slot(category)].as_ref()
    }

    pub fn set_person_image(&mut self, data_url: String) {
        self.person_image = Some(data_url);
    }

    pub fn clear_person_image(&mut self) {
        self.person_image = None;
    }

    /// Selected garment names in fixed category order — the list sent with a
    /// try-on request.
    pub fn selected_names(&self) -> Vec<String> {
        self.selected
            .iter()
            .flatten()
            .map(|g| g.name.clone())
            .collect()
    }

    pub fn has_selection(&self) -> bool {
        self.selected.iter().any(|s| s.is_some())
    }

    pub fn can_try_on(&self) -> bool {
        self.person_image.is_some() && self.has_selection()
    }
}
