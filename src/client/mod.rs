//! Access to Dependency-Track instances.
//!
//! [`Instance`] is the seam between the comparison pipeline and a concrete
//! instance. [`DtrackClient`] talks to a live server over HTTP; [`MemoryInstance`]
//! serves canned data and is what the pipeline tests run against.

mod http;
mod memory;

pub use http::{DtrackClient, DtrackClientConfig};
pub use memory::MemoryInstance;

use crate::error::{ClientErrorKind, CompareError, ErrorContext, Result};
use crate::model::{Finding, Project};

/// Default number of items requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOptions {
    pub page_number: u32,
    pub page_size: u32,
}

impl PageOptions {
    #[must_use]
    pub const fn first(page_size: u32) -> Self {
        Self {
            page_number: 1,
            page_size,
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            page_number: self.page_number + 1,
            page_size: self.page_size,
        }
    }
}

/// One page of results plus the server-reported total, when known.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: Option<usize>,
}

/// A Dependency-Track instance, shared by every comparison worker.
///
/// Implementations must be safe to call from many threads at once.
pub trait Instance: Send + Sync {
    /// Base URL (or other label) used in log lines.
    fn base_url(&self) -> &str;

    /// Fetch one page of projects.
    fn list_projects(&self, page: PageOptions) -> Result<Page<Project>>;

    /// Look up a project by name and version.
    ///
    /// Returns `Ok(None)` when the instance has no such project.
    fn lookup_project(&self, name: &str, version: &str) -> Result<Option<Project>>;

    /// Fetch one page of findings for the project with the given uuid.
    fn list_findings(
        &self,
        project_uuid: &str,
        include_suppressed: bool,
        page: PageOptions,
    ) -> Result<Page<Finding>>;
}

/// Upper bound on pages walked for one listing.
pub const MAX_PAGES: u32 = 10_000;

/// Walk pages from `fetch` until the collection is exhausted.
///
/// Stops on an empty page, once `total_count` items have been collected, or,
/// when the server reports no total, on the first page that is not exactly
/// `page_size` long. A page identical to the one before it means the server
/// ignores paging; it is dropped and the walk ends. Walking past
/// [`MAX_PAGES`] is an error.
pub fn collect_all<T, F>(page_size: u32, mut fetch: F) -> Result<Vec<T>>
where
    T: PartialEq,
    F: FnMut(PageOptions) -> Result<Page<T>>,
{
    let mut items = Vec::new();
    let mut previous = 0..0;
    let mut page = PageOptions::first(page_size.max(1));

    loop {
        if page.page_number > MAX_PAGES {
            return Err(CompareError::client(
                format!("walking pages of {} items", page.page_size),
                ClientErrorKind::InvalidResponse(format!(
                    "listing did not end after {MAX_PAGES} pages"
                )),
            ));
        }

        let Page {
            items: batch,
            total_count,
        } = fetch(page)?;
        let fetched = batch.len();
        if fetched > 0 && items.get(previous.clone()) == Some(batch.as_slice()) {
            tracing::warn!(
                "page {} repeats the previous page, assuming the listing is unpaged",
                page.page_number
            );
            break;
        }

        let start = items.len();
        items.extend(batch);
        previous = start..items.len();

        let exhausted = match total_count {
            Some(total) => items.len() >= total,
            None => fetched != page.page_size as usize,
        };
        if fetched == 0 || exhausted {
            break;
        }
        page = page.next();
    }

    Ok(items)
}

/// Every project on the instance.
pub fn collect_projects(instance: &dyn Instance, page_size: u32) -> Result<Vec<Project>> {
    collect_all(page_size, |page| {
        instance
            .list_projects(page)
            .with_context(|| format!("listing projects, page {}", page.page_number))
    })
}

/// Every finding for a project, suppressed ones included.
pub fn collect_findings(
    instance: &dyn Instance,
    project_uuid: &str,
    page_size: u32,
) -> Result<Vec<Finding>> {
    collect_all(page_size, |page| {
        instance
            .list_findings(project_uuid, true, page)
            .with_context(|| format!("fetching findings, page {}", page.page_number))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paged(data: &[u32], page: PageOptions, report_total: bool) -> Page<u32> {
        let start = ((page.page_number - 1) * page.page_size) as usize;
        let items = data
            .iter()
            .skip(start)
            .take(page.page_size as usize)
            .copied()
            .collect();
        Page {
            items,
            total_count: report_total.then_some(data.len()),
        }
    }

    #[test]
    fn test_collect_all_with_total() {
        let data: Vec<u32> = (0..25).collect();
        let mut calls = 0;
        let all = collect_all(10, |page| {
            calls += 1;
            Ok(paged(&data, page, true))
        })
        .unwrap();
        assert_eq!(all, data);
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_collect_all_without_total_stops_on_short_page() {
        let data: Vec<u32> = (0..20).collect();
        let mut calls = 0;
        let all = collect_all(10, |page| {
            calls += 1;
            Ok(paged(&data, page, false))
        })
        .unwrap();
        assert_eq!(all, data);
        // Two full pages, then an empty one.
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_collect_all_unpaged_server() {
        // Server ignores paging and returns everything at once.
        let data: Vec<u32> = (0..42).collect();
        let mut calls = 0;
        let all = collect_all(10, |_| {
            calls += 1;
            Ok(Page {
                items: data.clone(),
                total_count: None,
            })
        })
        .unwrap();
        assert_eq!(all.len(), 42);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_collect_all_stops_on_repeated_full_page() {
        // Server ignores paging and the whole listing is exactly one page.
        let data: Vec<u32> = (0..10).collect();
        let mut calls = 0;
        let all = collect_all(10, |_| {
            calls += 1;
            Ok(Page {
                items: data.clone(),
                total_count: None,
            })
        })
        .unwrap();
        assert_eq!(all, data);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_collect_all_gives_up_after_max_pages() {
        let mut calls = 0u32;
        let err = collect_all(1, |page| {
            calls += 1;
            Ok(Page {
                items: vec![page.page_number],
                total_count: None,
            })
        })
        .unwrap_err();
        assert_eq!(calls, MAX_PAGES);
        assert!(err.to_string().contains("did not end"), "{err}");
    }

    #[test]
    fn test_collect_all_propagates_error() {
        let result: Result<Vec<u32>> = collect_all(10, |_| {
            Err(CompareError::client(
                "listing",
                ClientErrorKind::Network("refused".into()),
            ))
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_collect_findings_adds_page_context() {
        let instance = MemoryInstance::new("memory://a")
            .with_project(Project::new("p1", "app", "1.0"), Vec::new())
            .with_failing_findings("p1");

        let err = collect_findings(&instance, "p1", 10).unwrap_err();
        assert!(err.to_string().contains("fetching findings, page 1"), "{err}");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_page_options_next() {
        let page = PageOptions::first(50).next();
        assert_eq!(page.page_number, 2);
        assert_eq!(page.page_size, 50);
    }
}
