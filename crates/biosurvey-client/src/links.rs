use biosurvey_core::models::ProjectMetadata;
use reqwest::Url;

/// Search engine used for "find out more" links
pub const WEB_SEARCH_BASE: &str = "https://www.google.com/search";

/// Web search query for a project: name, custodian and abstract
pub fn web_search_query(metadata: &ProjectMetadata) -> String {
    [
        metadata.project.name.as_str(),
        metadata.project.custodian_organisation.as_str(),
        metadata.abstract_text.as_str(),
    ]
    .iter()
    .map(|part| part.trim())
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

/// URL opening a web search about the project
pub fn web_search_url(metadata: &ProjectMetadata) -> Url {
    let mut url = Url::parse(WEB_SEARCH_BASE).expect("static search URL is valid");
    url.query_pairs_mut().append_pair("q", &web_search_query(metadata));
    url
}
