//! Integration tests for the provider user-info clients.
//!
//! These tests run the GitHub and GitLab clients against a local mock HTTP
//! server, verifying headers, fallback behavior, and error mapping.

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scaffgit::core::config::Config;
use scaffgit::scm::{create_client, ScmError, ScmIntegration, ScmIntegrationConfig, ScmIntegrations};
use scaffgit::scm::github::GithubClient;
use scaffgit::scm::gitlab::GitLabClient;
use scaffgit::scm::ScmClient;

mod github_client {
    use super::*;

    #[tokio::test]
    async fn public_email_needs_a_single_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user"))
            .and(header("Authorization", "token mocktoken"))
            .and(header("Accept", "application/vnd.github.v3+json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "login": "octocat",
                "email": "octocat@example.com"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GithubClient::new("mocktoken", server.uri());
        let info = client.get_user_info().await.unwrap();

        assert_eq!(info.user_name.as_deref(), Some("octocat"));
        assert_eq!(info.email.as_deref(), Some("octocat@example.com"));
    }

    #[tokio::test]
    async fn hidden_email_falls_back_to_the_primary_entry() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "login": "octocat",
                "email": null
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/user/emails"))
            .and(header("Authorization", "token mocktoken"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"email": "secondary@example.com", "primary": false},
                {"email": "primary@example.com", "primary": true}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = GithubClient::new("mocktoken", server.uri());
        let info = client.get_user_info().await.unwrap();

        assert_eq!(info.user_name.as_deref(), Some("octocat"));
        assert_eq!(info.email.as_deref(), Some("primary@example.com"));
    }

    #[tokio::test]
    async fn no_primary_flag_leaves_email_unknown() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "login": "octocat",
                "email": null
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/user/emails"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"email": "one@example.com", "primary": false},
                {"email": "two@example.com", "primary": false}
            ])))
            .mount(&server)
            .await;

        let client = GithubClient::new("mocktoken", server.uri());
        let info = client.get_user_info().await.unwrap();

        assert_eq!(info.user_name.as_deref(), Some("octocat"));
        assert_eq!(info.email, None);
    }

    #[tokio::test]
    async fn non_success_status_maps_to_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = GithubClient::new("badtoken", server.uri());
        let err = client.get_user_info().await.unwrap_err();

        assert_eq!(
            err,
            ScmError::ApiError {
                provider: "GitHub",
                status: "Forbidden".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn failing_emails_request_surfaces_the_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "login": "octocat",
                "email": null
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/user/emails"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = GithubClient::new("mocktoken", server.uri());
        let err = client.get_user_info().await.unwrap_err();

        assert!(matches!(err, ScmError::ApiError { status, .. } if status == "Not Found"));
    }
}

mod gitlab_client {
    use super::*;

    #[tokio::test]
    async fn personal_access_token_sends_private_token_header() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user"))
            .and(header("Private-Token", "glpat-mocktoken"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "username": "dev",
                "email": "dev@example.com"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GitLabClient::new("glpat-mocktoken", server.uri());
        let info = client.get_user_info().await.unwrap();

        assert_eq!(info.user_name.as_deref(), Some("dev"));
        assert_eq!(info.email.as_deref(), Some("dev@example.com"));
    }

    #[tokio::test]
    async fn other_tokens_send_a_bearer_header() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user"))
            .and(header("Authorization", "Bearer oauth-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "username": "dev",
                "email": "dev@example.com"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GitLabClient::new("oauth-token", server.uri());
        let info = client.get_user_info().await.unwrap();

        assert_eq!(info.user_name.as_deref(), Some("dev"));
    }

    #[tokio::test]
    async fn non_success_status_maps_to_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = GitLabClient::new("glpat-bad", server.uri());
        let err = client.get_user_info().await.unwrap_err();

        assert_eq!(
            err,
            ScmError::ApiError {
                provider: "GitLab",
                status: "Unauthorized".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn missing_email_is_tolerated() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "username": "dev",
                "email": null
            })))
            .mount(&server)
            .await;

        let client = GitLabClient::new("glpat-mocktoken", server.uri());
        let info = client.get_user_info().await.unwrap();

        assert_eq!(info.user_name.as_deref(), Some("dev"));
        assert_eq!(info.email, None);
    }
}

mod factory_against_mock_server {
    use super::*;

    #[tokio::test]
    async fn resolved_integration_drives_the_right_client() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user"))
            .and(header("Private-Token", "glpat-mocktoken"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "username": "dev",
                "email": "dev@example.com"
            })))
            .mount(&server)
            .await;

        let toml = format!(
            r#"
            [[integrations.gitlab]]
            host = "gitlab.example.com"
            token = "glpat-mocktoken"
            api_base_url = "{}"
            "#,
            server.uri()
        );
        let config: Config = toml::from_str(&toml).unwrap();
        let integrations = ScmIntegrations::from_config(&config.integrations);

        let integration = integrations
            .resolve("https://gitlab.example.com/group/project.git")
            .unwrap()
            .expect("integration should resolve");
        let client = create_client(&integration).unwrap();
        assert_eq!(client.provider(), "gitlab");

        let info = client.get_user_info().await.unwrap();
        assert_eq!(info.user_name.as_deref(), Some("dev"));
    }

    #[tokio::test]
    async fn tokenless_integration_cannot_build_a_client() {
        let integration = ScmIntegration::GitHub(ScmIntegrationConfig {
            host: "github.com".to_string(),
            token: None,
            api_base_url: "https://api.github.com".to_string(),
        });
        assert!(matches!(
            create_client(&integration),
            Err(ScmError::NoToken { .. })
        ));
    }
}
