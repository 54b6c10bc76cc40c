use serde::Deserialize;

/// Where to find things in the listing and detail markup.
///
/// Defaults match the reddit web components (`shreddit-post`, `shreddit-comment`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// One element per rendered post in the listing.
    pub item: String,
    /// Attribute on `item` holding the stable post id.
    pub id_attr: String,
    /// Attribute on `item` holding the display title.
    pub title_attr: String,
    /// Clickable element inside `item` that opens the post.
    pub item_link: String,
    /// Title element on the post page.
    pub detail_title: String,
    /// Body of the first comment on the post page.
    pub comment: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            item: "shreddit-post".into(),
            id_attr: "id".into(),
            title_attr: "post-title".into(),
            item_link: r#"a[slot="full-post-link"]"#.into(),
            detail_title: r#"h1[slot="title"]"#.into(),
            comment: r#"shreddit-comment div[slot="comment"]"#.into(),
        }
    }
}

impl Selectors {
    /// Selector matching exactly the listing item with `id`.
    pub fn item_with_id(&self, id: &str) -> String {
        format!(
            "{}[{}={}]",
            self.item,
            self.id_attr,
            serde_json::Value::String(id.to_string())
        )
    }

    /// Selector for the link inside the listing item with `id`.
    pub fn link_for_id(&self, id: &str) -> String {
        format!("{} {}", self.item_with_id(id), self.item_link)
    }
}
