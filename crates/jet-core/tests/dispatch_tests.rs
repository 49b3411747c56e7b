use jet_core::{
    handler, BoxedHandler, Dispatcher, Error, Fallback, ParamValue, Request, RequestBuilder,
    Response, ResponseBuilder, RouterConfig, Routes, StatusCode,
};
use pretty_assertions::assert_eq;

type App = Dispatcher<BoxedHandler<Request>>;

/// Responds with `name` and the stored parameters, e.g. `show id=42`
fn echo(name: &'static str) -> BoxedHandler<Request> {
    handler(move |req: &mut Request| {
        let mut body = name.to_string();
        if let Some(params) = req.path_params() {
            for (key, value) in params.iter() {
                let value = value.map(ParamValue::to_string).unwrap_or_default();
                body.push_str(&format!(" {key}={value}"));
            }
        }
        Response::text(body)
    })
}

fn books_routes() -> Routes<BoxedHandler<Request>> {
    Routes::new()
        .handler("/", echo("welcome"))
        .handler("/api/books", echo("list"))
        .handler("/api/books/:id", echo("show"))
        .handler("/api/books/:id/edit", echo("edit"))
}

fn app() -> App {
    Dispatcher::build(books_routes(), RouterConfig::new().cache_capacity(10)).unwrap()
}

fn body(res: &Response) -> String {
    res.body_string().unwrap_or_default()
}

#[test]
fn test_lookup_single_param() {
    let app = app();
    let found = app.router().lookup("/api/books/42").unwrap();
    assert_eq!(found.pattern, "/api/books/:id");
    assert_eq!(found.params.get_str("id"), Some("42"));

    let mut req = Request::new("GET", "/api/books/42");
    let res = app.dispatch(&mut req);
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(body(&res), "show id=42");
    assert_eq!(req.param("id"), Some("42"));
}

#[test]
fn test_fixed_path_stores_no_params() {
    let app = app();
    let mut req = Request::new("GET", "/api/books");
    assert_eq!(body(&app.dispatch(&mut req)), "list");
    assert!(req.path_params().is_none());
}

#[test]
fn test_trailing_slash_redirect() {
    let app = app();
    let res = app.dispatch(&mut Request::new("GET", "/api/books/42/"));
    assert_eq!(res.status, StatusCode::MOVED_PERMANENTLY);
    assert_eq!(res.location(), Some("/api/books/42"));
    assert_eq!(res.content_type(), Some("text/plain"));
    assert_eq!(body(&res), "Redirect to /api/books/42");

    let res = app.dispatch(&mut Request::new("HEAD", "/api/books/?sort=asc&page=2"));
    assert_eq!(res.location(), Some("/api/books?sort=asc&page=2"));
}

#[test]
fn test_no_redirect_for_post() {
    let app = app();
    let res = app.dispatch(&mut Request::new("POST", "/api/books/42/"));
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(body(&res), "404 Not Found");
}

#[test]
fn test_verb_map_dispatch() {
    let routes = Routes::new().methods(
        "/admin/books",
        [("GET", echo("admin_list")), ("POST", echo("admin_create"))],
    );
    let app: App = Dispatcher::build(routes, RouterConfig::new()).unwrap();

    let res = app.dispatch(&mut Request::new("HEAD", "/admin/books"));
    assert_eq!(body(&res), "admin_list");

    let res = app.dispatch(&mut Request::new("POST", "/admin/books"));
    assert_eq!(body(&res), "admin_create");

    let res = app.dispatch(&mut Request::new("PUT", "/admin/books"));
    assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.content_type(), Some("text/plain"));
    assert_eq!(body(&res), "405 Method Not Allowed");
}

#[test]
fn test_two_param_fast_path() {
    let routes = Routes::new().handler("/books/:id/comments/:comment_id", echo("comment"));
    let app: App = Dispatcher::build(routes, RouterConfig::new()).unwrap();

    let found = app.router().lookup("/books/7/comments/99").unwrap();
    let names: Vec<_> = found.params.names().collect();
    assert_eq!(names, vec!["id", "comment_id"]);
    assert_eq!(found.params.get_str("id"), Some("7"));
    assert_eq!(found.params.get_str("comment_id"), Some("99"));

    let res = app.dispatch(&mut Request::new("GET", "/books/7/comments/99"));
    assert_eq!(body(&res), "comment id=7 comment_id=99");
}

#[test]
fn test_unknown_verb_rejects_construction() {
    let routes = Routes::new().methods("/books", [("UNLOCK", echo("unlock"))]);
    let err = App::build(routes, RouterConfig::new()).unwrap_err();
    assert!(matches!(err, Error::UnknownMethod(_)));
    assert_eq!(err.to_string(), "UNLOCK: unknown request method");
}

#[test]
fn test_round_trip_every_variable_pattern() {
    let routes = Routes::new()
        .nest(
            "/api",
            Routes::new()
                .handler("/books/:id", echo("book"))
                .handler("/books/:book_id/comments/:comment_id", echo("comment"))
                .handler("/authors/:name(.:format)", echo("author")),
        )
        .handler("/archive/:year-:month-:day", echo("archive"));
    let app: App = Dispatcher::build(routes, RouterConfig::new()).unwrap();

    let cases = [
        ("/api/books/12", "book id=12"),
        ("/api/books/12/comments/3", "comment book_id=12 comment_id=3"),
        ("/api/authors/jane.json", "author name=jane format=json"),
        ("/api/authors/jane", "author name=jane format="),
        ("/archive/2024-05-17", "archive year=2024 month=05 day=17"),
    ];
    for (path, expected) in cases {
        let res = app.dispatch(&mut Request::new("GET", path));
        assert_eq!(body(&res), expected, "{path}");
    }
}

#[test]
fn test_custom_param_key_and_int_ids() {
    let routes = Routes::new().handler(
        "/books/:book_id/pages/:page",
        handler(|req: &mut Request| {
            let params = req.params("route").cloned().unwrap_or_default();
            Response::text(format!("{:?} {:?}", params.get("book_id"), params.get("page")))
        }),
    );
    let config = RouterConfig::new().param_key("route").int_ids();
    let app: App = Dispatcher::build(routes, config).unwrap();

    let mut req = Request::new("GET", "/books/12/pages/iv");
    let res = app.dispatch(&mut req);
    assert_eq!(body(&res), r#"Some(Int(12)) Some(Str("iv"))"#);
    assert!(req.path_params().is_none());

    let res = app.dispatch(&mut Request::new("GET", "/books/twelve/pages/iv"));
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[test]
fn test_cache_serves_repeat_lookups() {
    let app = app();
    for _ in 0..3 {
        let res = app.dispatch(&mut Request::new("GET", "/api/books/5/edit"));
        assert_eq!(body(&res), "edit id=5");
    }
    assert_eq!(app.router().cached_paths(), vec!["/api/books/5/edit"]);
}

#[test]
fn test_iteration_in_registration_order() {
    let app = app();
    let patterns: Vec<_> = app.router().iter().map(|(pattern, _)| pattern).collect();
    assert_eq!(
        patterns,
        vec!["/", "/api/books", "/api/books/:id", "/api/books/:id/edit"]
    );
}

struct JsonFallback;

impl Fallback for JsonFallback {
    fn not_found(&self, method: &str, path: &str) -> Response {
        ResponseBuilder::new(StatusCode::NOT_FOUND)
            .header("content-type", "application/json")
            .body(format!(r#"{{"error":"no route for {method} {path}"}}"#))
            .build()
    }
}

#[test]
fn test_custom_fallback() {
    let app = app().with_fallback(JsonFallback);

    let res = app.dispatch(&mut Request::new("DELETE", "/nowhere"));
    assert_eq!(res.content_type(), Some("application/json"));
    assert_eq!(body(&res), r#"{"error":"no route for DELETE /nowhere"}"#);

    // untouched defaults still apply
    let res = app.dispatch(&mut Request::new("GET", "/api/books/"));
    assert_eq!(res.status, StatusCode::MOVED_PERMANENTLY);
}

#[test]
fn test_handler_sees_request_fields() {
    let routes = Routes::new().handler(
        "/upload/:name",
        handler(|req: &mut Request| {
            let size = req.body.len();
            let kind = req.header("content-type").unwrap_or("none").to_string();
            Response::text(format!("{} {size} {kind}", req.param("name").unwrap_or("")))
        }),
    );
    let app: App = Dispatcher::build(routes, RouterConfig::new()).unwrap();

    let mut req = RequestBuilder::new("POST", "/upload/report")
        .header("Content-Type", "text/csv")
        .body("a,b\n1,2\n")
        .build();
    assert_eq!(body(&app.dispatch(&mut req)), "report 8 text/csv");
}
