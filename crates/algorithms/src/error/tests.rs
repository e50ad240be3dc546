use super::*;

#[test]
fn test_error_conversion() {
    let err = Error::param("user_id", "identity too long");
    match CoreError::from(err) {
        CoreError::Validation { context, message } => {
            assert_eq!(context, "user_id");
            assert_eq!(message, "identity too long");
        }
        other => panic!("Expected Validation error, got {:?}", other),
    }

    let err = Error::Length {
        context: "field element",
        expected: 32,
        actual: 16,
    };
    match CoreError::from(err) {
        CoreError::InvalidLength {
            context,
            expected,
            actual,
        } => {
            assert_eq!(context, "field element");
            assert_eq!(expected, 32);
            assert_eq!(actual, 16);
        }
        other => panic!("Expected InvalidLength error, got {:?}", other),
    }

    let err = Error::InvalidPoint {
        reason: "not on curve",
    };
    assert!(matches!(
        CoreError::from(err),
        CoreError::InvalidPoint { .. }
    ));

    let err = Error::Rng {
        context: "OsRng",
        details: "unavailable".into(),
    };
    assert_eq!(
        CoreError::from(err),
        CoreError::RandomGeneration {
            context: "OsRng",
            message: "unavailable".into()
        }
    );
}

#[test]
fn test_validation_functions() {
    assert!(validate::parameter(true, "test", "should pass").is_ok());
    let err = validate::parameter(false, "test", "should fail").unwrap_err();
    assert_eq!(err, Error::param("test", "should fail"));

    assert!(validate::length("buffer", 32, 32).is_ok());
    assert_eq!(
        validate::length("buffer", 16, 32).unwrap_err(),
        Error::Length {
            context: "buffer",
            expected: 32,
            actual: 16
        }
    );

    assert!(validate::max_length("buffer", 8, 8).is_ok());
    assert!(validate::max_length("buffer", 9, 8).is_err());

    assert!(validate::point(true, "ok").is_ok());
    assert_eq!(
        validate::point(false, "off curve").unwrap_err(),
        Error::InvalidPoint {
            reason: "off curve"
        }
    );
}

#[test]
fn test_to_core_result_sets_context() {
    let r: Result<()> = Err(Error::param("x", "bad"));
    let core = to_core_result(r, "decode").unwrap_err();
    assert_eq!(
        core,
        CoreError::Validation {
            context: "decode",
            message: "bad".into()
        }
    );
}
