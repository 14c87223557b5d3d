use serde::{Deserialize, Serialize};

use super::TaxonId;

/// A species candidate offered by autocomplete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesSuggestion {
    pub scientific_name: String,
    pub common_name: String,
    pub taxon_id: TaxonId,
    pub species_id: String,
    pub species_name: String,
}

impl SpeciesSuggestion {
    /// Label used in suggestion lists, e.g. "Phascolarctos cinereus (koala)"
    pub fn label(&self) -> String {
        if self.common_name.is_empty() {
            self.scientific_name.clone()
        } else {
            format!("{} ({})", self.scientific_name, self.common_name)
        }
    }
}

/// Sort suggestions lexicographically by scientific name, keeping ties stable
pub fn sort_by_scientific_name(suggestions: &mut [SpeciesSuggestion]) {
    suggestions.sort_by(|a, b| a.scientific_name.cmp(&b.scientific_name));
}
