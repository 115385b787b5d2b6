use crate::features::pages::{Action, PathValidator};

#[test]
fn test_valid_paths_yield_action_and_title() {
    let validator = PathValidator::new().unwrap();

    assert_eq!(
        validator.validate("/view/FrontPage"),
        Some((Action::View, "FrontPage".to_string()))
    );
    assert_eq!(
        validator.validate("/edit/abc123"),
        Some((Action::Edit, "abc123".to_string()))
    );
    assert_eq!(
        validator.validate("/save/X"),
        Some((Action::Save, "X".to_string()))
    );
}

// anything that could name a file outside the pages directory, or isn't a known action
#[test]
fn test_invalid_paths_are_rejected() {
    let validator = PathValidator::new().unwrap();

    let rejected = [
        "",
        "/",
        "/view",
        "/view/",
        "/view/../../etc/passwd",
        "/view/..",
        "/view/a.b",
        "/view/a/b",
        "/view/a b",
        "/view/a%2Fb",
        "/view/a-b",
        "/view/a_b",
        "/view/Foo/",
        "view/Foo",
        "//view/Foo",
        "/VIEW/Foo",
        "/delete/Foo",
        "/view/Foo\n",
        "/view/Ünïcode",
    ];

    for path in rejected {
        assert_eq!(validator.validate(path), None, "path {:?}", path);
    }
}

#[test]
fn test_action_names_round_trip() {
    for action in Action::ALL {
        assert_eq!(Action::from_name(&action.to_string()), Some(action));
    }
    assert_eq!(Action::from_name("delete"), None);
}

#[test]
fn test_action_paths() {
    assert_eq!(Action::View.path_for("Home"), "/view/Home");
    assert_eq!(Action::Edit.path_for("Home"), "/edit/Home");
    assert_eq!(Action::Save.path_for("Home"), "/save/Home");
}
