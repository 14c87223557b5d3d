pub mod coordinate;
pub mod criteria;
pub mod ids;
pub mod project;
pub mod species;
pub mod survey;

pub use coordinate::Coordinate;
pub use criteria::{SearchCriteria, SearchTarget, DEFAULT_RADIUS_METERS};
pub use ids::{join_ids, ProjectId, TaxonId};
pub use project::{ProjectInfo, ProjectMetadata};
pub use species::{sort_by_scientific_name, SpeciesSuggestion};
pub use survey::{SurveyDetail, SurveyGroup, SurveyPoint};
