//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use dex_app::ports::CommandPoster;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Merges API routes under `/api` and dashboard routes at `/`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<P>(state: AppState<P>) -> Router
where
    P: CommandPoster + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .merge(crate::dashboard::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use dex_app::dashboard::{Dashboard, SharedDashboard};
    use dex_app::service_control::ServiceControlForm;
    use dex_domain::command::{CommandReply, CommandRequest};
    use dex_domain::error::{CommandError, DexError};
    use dex_domain::name::ServiceName;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    #[derive(Default)]
    struct StubPoster {
        sent: Mutex<Vec<CommandRequest>>,
        fail: bool,
    }

    impl CommandPoster for StubPoster {
        async fn post(&self, request: CommandRequest) -> Result<CommandReply, DexError> {
            self.sent.lock().unwrap().push(request);
            if self.fail {
                return Err(CommandError::Rejected {
                    status: 500,
                    body: "sudo: service not permitted".to_string(),
                }
                .into());
            }
            Ok(CommandReply {
                body: "ok".to_string(),
            })
        }
    }

    impl StubPoster {
        fn sent(&self) -> Vec<CommandRequest> {
            self.sent.lock().unwrap().clone()
        }
    }

    fn dashboard() -> Dashboard {
        let services = ["A", "B", "C"].map(|name| ServiceName::new(name).unwrap());
        let mut dashboard = Dashboard::new().with_services(ServiceControlForm::new(services).unwrap());
        for name in dex_widgets::DEFAULT_WIDGETS {
            dashboard.install(dex_widgets::by_name(name).unwrap()).unwrap();
        }
        dex_widgets::system::install_system_buttons(&mut dashboard).unwrap();
        dex_widgets::install_instrument(&mut dashboard, "novatel").unwrap();
        dashboard
    }

    fn app(poster: &Arc<StubPoster>) -> Router {
        let state = AppState::from_shared(SharedDashboard::new(dashboard()), Arc::clone(poster))
            .with_refresh_seconds(3);
        build(state)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn json(response: Response) -> Value {
        serde_json::from_str(&text(response).await).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let response = app(&Arc::default()).oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(text(response).await, "OK");
    }

    #[tokio::test]
    async fn should_render_dashboard_with_refresh() {
        let response = app(&Arc::default()).oneshot(get("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let page = text(response).await;
        assert!(page.contains("<meta http-equiv=\"refresh\" content=\"3\">"));
        assert!(page.contains("<h2>USB-1608FS-Plus</h2>"));
    }

    #[tokio::test]
    async fn should_list_widget_descriptors_in_order() {
        let response = app(&Arc::default()).oneshot(get("/api/widgets")).await.unwrap();

        let names: Vec<String> = json(response)
            .await
            .as_array()
            .unwrap()
            .iter()
            .map(|widget| widget["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            [
                "overview",
                "sens_hmt310",
                "sens_novatel",
                "sens_cpt6100",
                "sens_usb1608fsplus",
                "instr_novatel"
            ]
        );
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_widget() {
        let response = app(&Arc::default())
            .oneshot(get("/api/widgets/sens_bogus"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_dispatch_snapshot_and_expose_ages() {
        let router = app(&Arc::default());
        let snapshot = json!({
            "novatel": { "_now": 1.25, "record": "#BESTPOSA" },
            "cpt6100_port1": { "_now": 0.5, "pressure": 1013.2 },
            "unrelated": { "_now": 99.0 }
        });

        let response = router
            .clone()
            .oneshot(post_json("/api/snapshot", &snapshot))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let report = json(response).await;
        assert_eq!(report["failures"], json!([]));
        assert_eq!(report["invoked"], json!(6));

        let ages = json(router.oneshot(get("/api/ages")).await.unwrap()).await;
        assert_eq!(ages["novatel_age"]["age_s"], json!(1.25));
        assert_eq!(ages["cpt6100_port1_age"]["age_s"], json!(0.5));
        assert_eq!(ages["hmt310_age"]["age_s"], Value::Null);
        assert!(ages.get("unrelated_age").is_none());
    }

    #[tokio::test]
    async fn should_report_malformed_source_without_failing_request() {
        let router = app(&Arc::default());
        let snapshot = json!({
            "hmt310": { "_now": 1.0, "data": "not a table" },
            "novatel": { "_now": 2.0, "record": "ok" }
        });

        let response = router
            .clone()
            .oneshot(post_json("/api/snapshot", &snapshot))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let failed: Vec<String> = json(response).await["failures"]
            .as_array()
            .unwrap()
            .iter()
            .map(|failure| failure["widget"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(failed, ["overview", "sens_hmt310"]);

        let ages = json(router.oneshot(get("/api/ages")).await.unwrap()).await;
        assert_eq!(ages["novatel_age"]["age_s"], json!(2.0));
    }

    #[tokio::test]
    async fn should_accept_snapshot_with_sources_no_widget_reads() {
        let router = app(&Arc::default());
        let snapshot = json!({
            "novatel": { "_now": 1.0, "record": "x" },
            "status": "ok"
        });

        let response = router
            .clone()
            .oneshot(post_json("/api/snapshot", &snapshot))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json(response).await["failures"], json!([]));
        let ages = json(router.oneshot(get("/api/ages")).await.unwrap()).await;
        assert_eq!(ages["novatel_age"]["age_s"], json!(1.0));
    }

    #[tokio::test]
    async fn should_fail_only_readers_of_a_source_that_is_not_an_object() {
        let router = app(&Arc::default());
        let snapshot = json!({
            "hmt310": "offline",
            "novatel": { "_now": 3.0, "record": "x" }
        });

        let response = router
            .clone()
            .oneshot(post_json("/api/snapshot", &snapshot))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let report = json(response).await;
        let failed: Vec<&str> = report["failures"]
            .as_array()
            .unwrap()
            .iter()
            .map(|failure| failure["widget"].as_str().unwrap())
            .collect();
        assert_eq!(failed, ["overview", "sens_hmt310"]);
        let ages = json(router.oneshot(get("/api/ages")).await.unwrap()).await;
        assert_eq!(ages["novatel_age"]["age_s"], json!(3.0));
    }

    #[tokio::test]
    async fn should_render_every_element_id_once() {
        let page = text(app(&Arc::default()).oneshot(get("/")).await.unwrap()).await;

        let ids: Vec<&str> = page
            .split(" id=\"")
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .collect();
        let mut unique = ids.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), ids.len(), "duplicate ids in {ids:?}");
        assert!(ids.contains(&"sens_novatel.age"));
        assert!(ids.contains(&"instr_novatel.age"));
    }

    #[tokio::test]
    async fn should_ask_for_confirmation_before_posting() {
        let poster = Arc::new(StubPoster::default());

        let response = app(&poster)
            .oneshot(post_form("/commands/reboot", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let page = text(response).await;
        assert!(page.contains("Are you sure?"));
        assert!(page.contains("action=\"/commands/reboot\""));
        assert!(poster.sent().is_empty());
    }

    #[tokio::test]
    async fn should_post_once_and_redirect_when_confirmed() {
        let poster = Arc::new(StubPoster::default());

        let response = app(&poster)
            .oneshot(post_form("/commands/poweroff", "confirmed=true"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        let sent = poster.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].command(), "poweroff");
    }

    #[tokio::test]
    async fn should_show_error_page_when_command_fails() {
        let poster = Arc::new(StubPoster {
            fail: true,
            ..StubPoster::default()
        });

        let response = app(&poster)
            .oneshot(post_form("/commands/reboot", "confirmed=true"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert!(text(response).await.contains("service not permitted"));
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_command() {
        let response = app(&Arc::default())
            .oneshot(post_form("/commands/selfdestruct", "confirmed=true"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_send_only_selected_services() {
        let poster = Arc::new(StubPoster::default());

        let response = app(&poster)
            .oneshot(post_form("/services", "svc.A=start&svc.B=none&svc.C=stop"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let sent: Vec<Vec<String>> = poster.sent().iter().map(|req| req.args().to_vec()).collect();
        assert_eq!(sent, [["A", "start"], ["C", "stop"]]);
    }

    #[tokio::test]
    async fn should_reset_service_choices_after_submit() {
        let poster = Arc::new(StubPoster::default());
        let router = app(&poster);

        router
            .clone()
            .oneshot(post_form("/services", "svc.A=status"))
            .await
            .unwrap();
        let page = text(router.oneshot(get("/")).await.unwrap()).await;

        assert!(page.contains("name=\"svc.A\" value=\"none\" checked"));
    }

    #[tokio::test]
    async fn should_reject_unknown_service_without_sending() {
        let poster = Arc::new(StubPoster::default());

        let response = app(&poster)
            .oneshot(post_form("/services", "svc.A=start&svc.Z=stop"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(poster.sent().is_empty());
    }

    #[tokio::test]
    async fn should_list_failed_service_commands() {
        let poster = Arc::new(StubPoster {
            fail: true,
            ..StubPoster::default()
        });

        let response = app(&poster)
            .oneshot(post_form("/services", "svc.A=start&svc.C=stop"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let page = text(response).await;
        assert!(page.contains("sys_control:service A start"));
        assert!(page.contains("sys_control:service C stop"));
        assert_eq!(poster.sent().len(), 2);
    }

    #[tokio::test]
    async fn should_send_raw_instrument_command_when_confirmed() {
        let poster = Arc::new(StubPoster::default());

        let response = app(&poster)
            .oneshot(post_form("/instruments/novatel", "raw=LOG+VERSION&confirmed=true"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let sent = poster.sent();
        assert_eq!(sent[0].target(), "instrument");
        assert_eq!(sent[0].args(), ["novatel", "LOG VERSION"]);
    }

    #[tokio::test]
    async fn should_carry_raw_command_onto_confirm_page() {
        let poster = Arc::new(StubPoster::default());

        let response = app(&poster)
            .oneshot(post_form("/instruments/novatel", "raw=LOG+VERSION"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(text(response).await.contains("name=\"raw\" value=\"LOG VERSION\""));
        assert!(poster.sent().is_empty());
    }

    #[tokio::test]
    async fn should_keep_surrounding_whitespace_of_instrument_command() {
        let poster = Arc::new(StubPoster::default());
        let router = app(&poster);

        let response = router
            .clone()
            .oneshot(post_form("/instruments/novatel", "raw=+LOG+VERSION+"))
            .await
            .unwrap();
        assert!(text(response).await.contains("name=\"raw\" value=\" LOG VERSION \""));

        router
            .oneshot(post_form("/instruments/novatel", "raw=+LOG+VERSION+&confirmed=true"))
            .await
            .unwrap();
        assert_eq!(poster.sent()[0].args(), ["novatel", " LOG VERSION "]);
    }

    #[tokio::test]
    async fn should_reject_blank_instrument_command() {
        let response = app(&Arc::default())
            .oneshot(post_form("/instruments/novatel", "raw=+++&confirmed=true"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
