// Lists: Manage Account > Configurations > Lists
use async_trait::async_trait;

use crate::error::{ApiOperation, Result};
use crate::provider::ListApi;
use crate::types::{
    BulkOperation, IpList, ItemRef, ListItem, NewIpList, NewListItem, OperationRef,
};

use super::cloudflare::Cloudflare;

impl Cloudflare {
    fn lists_path(&self) -> Result<String> {
        Ok(format!("/accounts/{}/rules/lists", self.account_id()?))
    }

    fn list_path(&self, list_id: &str) -> Result<String> {
        Ok(format!("{}/{}", self.lists_path()?, list_id))
    }

    fn items_path(&self, list_id: &str) -> Result<String> {
        Ok(format!("{}/items", self.list_path(list_id)?))
    }
}

#[async_trait]
impl ListApi for Cloudflare {
    async fn lists(&self) -> Result<Vec<IpList>> {
        let resp = self.cli.get(&self.lists_path()?, &[]).await?;
        if !resp.success {
            return Err(resp.failure(ApiOperation::ListsFetch));
        }
        resp.into_result_or_default()
    }

    async fn list(&self, list_id: &str) -> Result<IpList> {
        let resp = self.cli.get(&self.list_path(list_id)?, &[]).await?;
        if !resp.success {
            return Err(resp.failure(ApiOperation::ListFetch));
        }
        resp.into_result()
    }

    async fn create_list(&self, list: &NewIpList) -> Result<IpList> {
        let resp = self.cli.post(&self.lists_path()?, list).await?;
        if !resp.success {
            return Err(resp.failure(ApiOperation::ListCreate));
        }
        resp.into_result()
    }

    async fn delete_list(&self, list_id: &str) -> Result<()> {
        let resp = self
            .cli
            .delete::<()>(&self.list_path(list_id)?, None)
            .await?;
        if !resp.success {
            return Err(resp.failure(ApiOperation::ListDelete));
        }
        Ok(())
    }

    async fn list_items(&self, list_id: &str) -> Result<Vec<ListItem>> {
        let path = self.items_path(list_id)?;
        let mut items: Vec<ListItem> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let resp = match cursor.as_deref() {
                Some(c) => self.cli.get(&path, &[("cursor", c)]).await?,
                None => self.cli.get(&path, &[]).await?,
            };
            if !resp.success {
                return Err(resp.failure(ApiOperation::ListItemsFetch));
            }

            let next = resp.next_cursor().map(String::from);
            let page: Vec<ListItem> = resp.into_result_or_default()?;
            pages += 1;
            log::debug!("list {} page {}: {} items", list_id, pages, page.len());
            items.extend(page);

            match next {
                Some(after) => cursor = Some(after),
                None => break,
            }
        }

        Ok(items)
    }

    async fn create_items(&self, list_id: &str, items: &[NewListItem]) -> Result<OperationRef> {
        let resp = self.cli.post(&self.items_path(list_id)?, items).await?;
        if !resp.success {
            return Err(resp.failure(ApiOperation::ListItemsCreate));
        }
        resp.into_result()
    }

    async fn replace_items(&self, list_id: &str, items: &[NewListItem]) -> Result<OperationRef> {
        let resp = self.cli.put(&self.items_path(list_id)?, items).await?;
        if !resp.success {
            return Err(resp.failure(ApiOperation::ListItemsReplace));
        }
        resp.into_result()
    }

    async fn delete_items(&self, list_id: &str, items: &[ItemRef]) -> Result<OperationRef> {
        let resp = self
            .cli
            .delete(&self.items_path(list_id)?, Some(items))
            .await?;
        if !resp.success {
            return Err(resp.failure(ApiOperation::ListItemsDelete));
        }
        resp.into_result()
    }

    async fn bulk_operation(&self, operation_id: &str) -> Result<BulkOperation> {
        let path = format!("{}/bulk_operations/{}", self.lists_path()?, operation_id);
        let resp = self.cli.get(&path, &[]).await?;
        if !resp.success {
            return Err(resp.failure(ApiOperation::BulkOperationFetch));
        }
        resp.into_result()
    }
}
