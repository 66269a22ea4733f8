use crate::core::catalog::Catalog;
use crate::server::http::{Request, Response, Status};
use crate::utils::error::{CatalogError, Result};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    ListCourses,
    SearchCourses,
    Health,
}

pub struct Router {
    inner: matchit::Router<Route>,
}

impl Router {
    pub fn new() -> Result<Self> {
        let mut inner = matchit::Router::new();
        for (path, route) in [
            ("/api/courses", Route::ListCourses),
            ("/api/courses/search", Route::SearchCourses),
            ("/health", Route::Health),
        ] {
            inner
                .insert(path, route)
                .map_err(|e| CatalogError::ConfigError {
                    message: format!("Invalid route {}: {}", path, e),
                })?;
        }
        Ok(Self { inner })
    }

    pub fn handle(&self, catalog: &Catalog, request: &Request) -> Response {
        // 先比對路徑，未知路徑回應 404
        let route = match self.inner.at(&request.path) {
            Ok(matched) => *matched.value,
            Err(_) => return Response::error(Status::NotFound, "not_found", "no such route"),
        };

        // 路徑存在但方法不是 GET，回應 405
        if request.method != "GET" {
            return Response::error(
                Status::MethodNotAllowed,
                "method_not_allowed",
                "only GET is supported",
            )
            .with_header("allow", "GET");
        }

        match route {
            Route::ListCourses => Response::json(Status::Ok, catalog.records()),
            Route::SearchCourses => search(catalog, request),
            Route::Health => Response::json(
                Status::Ok,
                &json!({ "status": "ok", "courses": catalog.len() }),
            ),
        }
    }
}

fn search(catalog: &Catalog, request: &Request) -> Response {
    let query = request.query_param("query");
    tracing::debug!("Search query: {:?}", query);

    match catalog.search(query) {
        Ok(courses) => Response::json(Status::Ok, &courses),
        // 缺少 query 參數屬於客戶端錯誤
        Err(e) if e.is_client_error() => {
            Response::error(Status::BadRequest, "invalid_query", &e.to_string())
        }
        Err(e) => {
            tracing::error!("❌ Search failed: {}", e);
            Response::error(Status::InternalServerError, "internal", "search failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CourseRecord;

    fn catalog() -> Catalog {
        Catalog::from_records(vec![
            CourseRecord::new(1, "Intro to Go", "Beginner", "", "https://go.example/1"),
            CourseRecord::new(2, "Advanced Go", "Advanced", "", "https://go.example/2"),
            CourseRecord::new(3, "Rust Basics", "Beginner", "", "https://rust.example/3"),
        ])
        .unwrap()
    }

    fn get(path: &str) -> Response {
        let request = Request::parse(&format!("GET {} HTTP/1.1", path)).unwrap();
        Router::new().unwrap().handle(&catalog(), &request)
    }

    fn body(response: &Response) -> serde_json::Value {
        serde_json::from_slice(&response.body).unwrap()
    }

    #[test]
    fn test_list_courses() {
        let response = get("/api/courses");
        assert_eq!(response.status, Status::Ok);
        assert_eq!(body(&response).as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_search_courses() {
        let response = get("/api/courses/search?query=GO");
        assert_eq!(response.status, Status::Ok);
        let ids: Vec<u64> = body(&response)
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, [1, 2]);
    }

    #[test]
    fn test_search_without_query_is_bad_request() {
        let response = get("/api/courses/search");
        assert_eq!(response.status, Status::BadRequest);
        assert_eq!(body(&response)["kind"], "invalid_query");
    }

    #[test]
    fn test_search_no_hits_is_empty_array() {
        let response = get("/api/courses/search?query=xyz");
        assert_eq!(response.status, Status::Ok);
        assert_eq!(body(&response), json!([]));
    }

    #[test]
    fn test_health() {
        let response = get("/health");
        assert_eq!(body(&response), json!({ "status": "ok", "courses": 3 }));
    }

    #[test]
    fn test_unknown_route_and_method() {
        assert_eq!(get("/nope").status, Status::NotFound);

        let request = Request::parse("POST /api/courses HTTP/1.1").unwrap();
        let response = Router::new().unwrap().handle(&catalog(), &request);
        assert_eq!(response.status, Status::MethodNotAllowed);
        assert!(response.headers.contains(&("allow", "GET".to_string())));
    }
}
