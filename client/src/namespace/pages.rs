use customgpt_core::api::{
    CreateSource, CreateSourceOutcome, DeletePage, DeletePageOutcome, DeleteSource, DeleteSourceOutcome,
    GetPageMetadata, GetPageMetadataOutcome, ListPages, ListPagesOutcome, ListSources, ListSourcesOutcome,
    PreviewPage, PreviewPageOutcome, ReindexPage, ReindexPageOutcome, UpdatePageMetadata,
    UpdatePageMetadataOutcome,
};
use customgpt_core::{ApiError, Endpoint, Response};

use crate::error::Error;
use crate::kwargs::Kwargs;

const METADATA_FIELDS: &[&str] = &["title", "url", "description", "image"];
const SOURCE_FIELDS: &[&str] = &["sitemap_path", "file_data_retension", "file"];

namespace! {
    /// `session.pages()`
    Pages
}

impl Pages<'_> {
    /// Accepts `page`, `duration` and `order`.
    pub fn list(&self, project_id: i64, kwargs: Kwargs) -> Result<Response<ListPagesOutcome>, Error> {
        self.target.call(&list_request(project_id, kwargs)?)
    }

    pub async fn list_async(&self, project_id: i64, kwargs: Kwargs) -> Result<Response<ListPagesOutcome>, Error> {
        self.target.call_async(&list_request(project_id, kwargs)?).await
    }

    pub fn delete(&self, project_id: i64, page_id: i64) -> Result<Response<DeletePageOutcome>, Error> {
        self.target.call(&DeletePage { project_id, page_id })
    }

    pub async fn delete_async(&self, project_id: i64, page_id: i64) -> Result<Response<DeletePageOutcome>, Error> {
        self.target.call_async(&DeletePage { project_id, page_id }).await
    }

    pub fn reindex(&self, project_id: i64, page_id: i64) -> Result<Response<ReindexPageOutcome>, Error> {
        self.target.call(&ReindexPage { project_id, page_id })
    }

    pub async fn reindex_async(&self, project_id: i64, page_id: i64) -> Result<Response<ReindexPageOutcome>, Error> {
        self.target.call_async(&ReindexPage { project_id, page_id }).await
    }

    /// The file behind a citation. A successful reply is raw content and
    /// stays unclassified; read it from `Response::content`.
    pub fn preview(&self, id: &str) -> Result<Response<PreviewPageOutcome>, Error> {
        self.target.call(&PreviewPage { id: id.to_string() })
    }

    pub async fn preview_async(&self, id: &str) -> Result<Response<PreviewPageOutcome>, Error> {
        self.target.call_async(&PreviewPage { id: id.to_string() }).await
    }
}

fn list_request(project_id: i64, kwargs: Kwargs) -> Result<ListPages, ApiError> {
    Ok(ListPages {
        project_id,
        query: kwargs.into_query(ListPages::NAME)?,
    })
}

namespace! {
    /// `session.page_metadata()`
    PageMetadata
}

impl PageMetadata<'_> {
    pub fn get(&self, project_id: i64, page_id: i64) -> Result<Response<GetPageMetadataOutcome>, Error> {
        self.target.call(&GetPageMetadata { project_id, page_id })
    }

    pub async fn get_async(&self, project_id: i64, page_id: i64) -> Result<Response<GetPageMetadataOutcome>, Error> {
        self.target.call_async(&GetPageMetadata { project_id, page_id }).await
    }

    /// `title`, `url`, `description`, `image`; pass null to clear one.
    pub fn update(
        &self,
        project_id: i64,
        page_id: i64,
        kwargs: Kwargs,
    ) -> Result<Response<UpdatePageMetadataOutcome>, Error> {
        self.target.call(&update_metadata_request(project_id, page_id, kwargs)?)
    }

    pub async fn update_async(
        &self,
        project_id: i64,
        page_id: i64,
        kwargs: Kwargs,
    ) -> Result<Response<UpdatePageMetadataOutcome>, Error> {
        self.target.call_async(&update_metadata_request(project_id, page_id, kwargs)?).await
    }
}

fn update_metadata_request(project_id: i64, page_id: i64, mut kwargs: Kwargs) -> Result<UpdatePageMetadata, ApiError> {
    let body = kwargs.pluck_json(UpdatePageMetadata::NAME, METADATA_FIELDS)?;
    kwargs.finish(UpdatePageMetadata::NAME)?;
    Ok(UpdatePageMetadata {
        project_id,
        page_id,
        body,
    })
}

namespace! {
    /// `session.sources()`
    Sources
}

impl Sources<'_> {
    pub fn list(&self, project_id: i64) -> Result<Response<ListSourcesOutcome>, Error> {
        self.target.call(&ListSources { project_id })
    }

    pub async fn list_async(&self, project_id: i64) -> Result<Response<ListSourcesOutcome>, Error> {
        self.target.call_async(&ListSources { project_id }).await
    }

    pub fn create(&self, project_id: i64, kwargs: Kwargs) -> Result<Response<CreateSourceOutcome>, Error> {
        self.target.call(&create_source_request(project_id, kwargs)?)
    }

    pub async fn create_async(&self, project_id: i64, kwargs: Kwargs) -> Result<Response<CreateSourceOutcome>, Error> {
        self.target.call_async(&create_source_request(project_id, kwargs)?).await
    }

    pub fn delete(&self, project_id: i64, source_id: i64) -> Result<Response<DeleteSourceOutcome>, Error> {
        self.target.call(&DeleteSource { project_id, source_id })
    }

    pub async fn delete_async(&self, project_id: i64, source_id: i64) -> Result<Response<DeleteSourceOutcome>, Error> {
        self.target.call_async(&DeleteSource { project_id, source_id }).await
    }
}

fn create_source_request(project_id: i64, mut kwargs: Kwargs) -> Result<CreateSource, ApiError> {
    let body = kwargs.pluck_form(CreateSource::NAME, SOURCE_FIELDS)?;
    kwargs.finish(CreateSource::NAME)?;
    Ok(CreateSource { project_id, body })
}
