use crate::config::Selectors;
use crate::model::ListingItem;
use crate::source::ListingSource;
use crate::{Error, Result};
use async_trait::async_trait;
use eoka::Page;
use tracing::debug;

/// A [`ListingSource`] backed by a live eoka page.
pub struct PageSource<'a> {
    page: &'a Page,
    selectors: Selectors,
}

impl<'a> PageSource<'a> {
    pub fn new(page: &'a Page, selectors: Selectors) -> Self {
        Self { page, selectors }
    }

    async fn element_exists(&self, selector: &str) -> Result<bool> {
        let js = format!("!!document.querySelector({})", js_str(selector));
        Ok(self.page.evaluate(&js).await?)
    }

    async fn scroll_into_view(&self, selector: &str) -> Result<()> {
        let js = format!(
            "document.querySelector({})?.scrollIntoView({{block:'center'}})",
            js_str(selector)
        );
        self.page.execute(&js).await?;
        self.page.wait(200).await;
        Ok(())
    }

    async fn text_of(&self, selector: &str) -> Result<Option<String>> {
        let js = format!(
            "document.querySelector({})?.textContent?.trim() ?? null",
            js_str(selector)
        );
        Ok(self.page.evaluate(&js).await?)
    }
}

/// Quote a string as a JS literal.
fn js_str(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

#[async_trait(?Send)]
impl<'a> ListingSource for PageSource<'a> {
    async fn open_listing(&mut self, url: &str) -> Result<()> {
        self.page.goto(url).await?;
        Ok(())
    }

    async fn wait_for_items(&mut self, timeout_ms: u64) -> Result<bool> {
        match self.page.wait_for(&self.selectors.item, timeout_ms).await {
            Ok(_) => Ok(true),
            Err(e) => {
                debug!("wait_for '{}': {}", self.selectors.item, e);
                Ok(false)
            }
        }
    }

    async fn item_count(&self) -> Result<usize> {
        let js = format!(
            "document.querySelectorAll({}).length",
            js_str(&self.selectors.item)
        );
        Ok(self.page.evaluate(&js).await?)
    }

    async fn item_title(&self, index: usize) -> Result<Option<String>> {
        let js = format!(
            r#"(() => {{
                const el = document.querySelectorAll({sel})[{index}];
                if (!el) return null;
                return el.getAttribute({attr}) || el.textContent?.trim() || '';
            }})()"#,
            sel = js_str(&self.selectors.item),
            attr = js_str(&self.selectors.title_attr),
        );
        Ok(self.page.evaluate(&js).await?)
    }

    async fn snapshot(&self) -> Result<Vec<ListingItem>> {
        let js = format!(
            r#"JSON.stringify(Array.from(document.querySelectorAll({sel})).map(el => ({{
                id: el.getAttribute({id}) || '',
                title: el.getAttribute({title}) || el.textContent?.trim() || ''
            }})))"#,
            sel = js_str(&self.selectors.item),
            id = js_str(&self.selectors.id_attr),
            title = js_str(&self.selectors.title_attr),
        );
        let json: String = self.page.evaluate(&js).await?;
        serde_json::from_str(&json)
            .map_err(|e| Error::ActionFailed(format!("listing snapshot parse error: {}", e)))
    }

    async fn document_height(&self) -> Result<u64> {
        Ok(self
            .page
            .evaluate("Math.max(document.body.scrollHeight, document.documentElement.scrollHeight)")
            .await?)
    }

    async fn scroll_to(&mut self, y: u64) -> Result<()> {
        self.page.execute(&format!("window.scrollTo(0, {y})")).await?;
        Ok(())
    }

    async fn scroll_by(&mut self, dy: i64) -> Result<()> {
        self.page.execute(&format!("window.scrollBy(0, {dy})")).await?;
        Ok(())
    }

    async fn open_item(&mut self, id: &str) -> Result<()> {
        let link = self.selectors.link_for_id(id);
        let selector = if self.element_exists(&link).await? {
            link
        } else {
            let item = self.selectors.item_with_id(id);
            if !self.element_exists(&item).await? {
                return Err(Error::ActionFailed(format!("post '{}' not rendered", id)));
            }
            item
        };
        debug!("click: {}", selector);
        self.scroll_into_view(&selector).await?;
        self.page.click(&selector).await?;
        Ok(())
    }

    async fn detail_title(&self) -> Result<String> {
        Ok(self
            .text_of(&self.selectors.detail_title)
            .await?
            .unwrap_or_default())
    }

    async fn first_comment(&mut self, timeout_ms: u64) -> Result<Option<String>> {
        if let Err(e) = self.page.wait_for(&self.selectors.comment, timeout_ms).await {
            debug!("no comment within {}ms: {}", timeout_ms, e);
            return Ok(None);
        }
        self.text_of(&self.selectors.comment).await
    }

    async fn back_to_listing(&mut self) -> Result<()> {
        self.page.back().await?;
        Ok(())
    }

    async fn pause(&mut self, ms: u64) {
        self.page.wait(ms).await;
    }
}
