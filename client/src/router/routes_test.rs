use super::*;

#[test]
fn matches_static_routes() {
    assert_eq!(match_route("/").unwrap().name, RouteName::Home);
    assert_eq!(match_route("/login").unwrap().name, RouteName::Login);
    assert_eq!(match_route("/register/").unwrap().name, RouteName::Register);
    assert_eq!(match_route("/history?page=2").unwrap().name, RouteName::History);
}

#[test]
fn captures_detail_id() {
    let matched = match_route("/detail/42").unwrap();
    assert_eq!(matched.name, RouteName::Detail);
    assert_eq!(matched.param("id"), Some("42"));
    assert_eq!(matched.param("missing"), None);
}

#[test]
fn unknown_paths_do_not_match() {
    assert!(match_route("/detail").is_none());
    assert!(match_route("/detail/1/edit").is_none());
    assert!(match_route("/about").is_none());
}

#[test]
fn requirements_follow_route_tags() {
    assert_eq!(RouteName::Login.requirement(), RouteRequirement::GuestOnly);
    assert_eq!(RouteName::Register.requirement(), RouteRequirement::GuestOnly);
    assert_eq!(RouteName::Home.requirement(), RouteRequirement::RequiresAuth);
    assert_eq!(RouteName::History.requirement(), RouteRequirement::RequiresAuth);
    assert_eq!(RouteName::Detail.requirement(), RouteRequirement::RequiresAuth);
}

#[test]
fn static_segments_match_regardless_of_case() {
    assert_eq!(match_route("/History").unwrap().name, RouteName::History);
    assert_eq!(match_route("/LOGIN?next=/").unwrap().name, RouteName::Login);

    let matched = match_route("/Detail/AbC").unwrap();
    assert_eq!(matched.name, RouteName::Detail);
    assert_eq!(matched.param("id"), Some("AbC"));
}
