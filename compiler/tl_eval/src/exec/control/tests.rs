use super::*;
use std::cell::Cell;
use tl_value::{EvalErrorKind, TypeTag};

fn int(result: &EvalResult) -> Option<i64> {
    result.as_ref().ok().and_then(Value::as_int)
}

mod blocks {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_block_is_void() {
        let result = eval_block(Vec::<i64>::new(), |n| Ok(Value::int(n)));
        assert!(matches!(result, Ok(Value::Void)));
    }

    #[test]
    fn last_statement_is_the_value() {
        let result = eval_block([1, 2, 3], |n| Ok(Value::int(n)));
        assert_eq!(int(&result), Some(3));
    }

    #[test]
    fn first_signal_stops_the_block() {
        let mut seen = Vec::new();
        let result = eval_block([1, 2, 3], |n| {
            seen.push(n);
            if n == 1 {
                Err(ControlAction::Return(Value::int(1)))
            } else {
                Ok(Value::int(n))
            }
        });
        assert_eq!(seen, vec![1]);
        assert!(matches!(result, Err(ControlAction::Return(Value::Int(1)))));
    }
}

mod loops {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn loop_action_classification() {
        assert!(matches!(to_loop_action(Ok(Value::int(1))), LoopAction::Continue));
        assert!(matches!(
            to_loop_action(Err(ControlAction::Jump)),
            LoopAction::Continue
        ));
        assert!(matches!(
            to_loop_action(Err(ControlAction::Out(Value::int(7)))),
            LoopAction::Break(Value::Int(7))
        ));
        assert!(matches!(
            to_loop_action(Err(ControlAction::Return(Value::Void))),
            LoopAction::Propagate(ControlAction::Return(Value::Void))
        ));
    }

    #[test]
    fn runs_until_condition_fails() {
        let i = Cell::new(0);
        let result = eval_loop(
            || Ok(i.get() < 5),
            || {
                i.set(i.get() + 1);
                Ok(Value::int(i.get()))
            },
        );
        assert!(matches!(result, Ok(Value::Void)));
        assert_eq!(i.get(), 5);
    }

    #[test]
    fn out_leaves_with_payload() {
        let mut i = 0;
        let result = eval_loop(
            || Ok(true),
            || {
                i += 1;
                if i == 3 {
                    Err(ControlAction::Out(Value::string("done")))
                } else {
                    Ok(Value::Void)
                }
            },
        );
        assert_eq!(
            result.ok().and_then(|v| v.as_str().map(str::to_owned)),
            Some("done".to_string())
        );
        assert_eq!(i, 3);
    }

    #[test]
    fn jump_skips_to_next_iteration() {
        let i = Cell::new(0);
        let mut tail = 0;
        let result = eval_loop(
            || Ok(i.get() < 4),
            || {
                i.set(i.get() + 1);
                eval_block([0, 1], |stmt| {
                    if stmt == 0 && i.get() % 2 == 0 {
                        return Err(ControlAction::Jump);
                    }
                    if stmt == 1 {
                        tail += 1;
                    }
                    Ok(Value::Void)
                })
            },
        );
        assert!(result.is_ok());
        assert_eq!(tail, 2);
    }

    #[test]
    fn return_and_error_pass_through() {
        let result = eval_loop(|| Ok(true), || Err(ControlAction::Return(Value::int(9))));
        assert!(matches!(result, Err(ControlAction::Return(Value::Int(9)))));

        let result = eval_loop(|| Ok(true), || Err(EvalError::new("boom").into()));
        assert!(matches!(result, Err(ControlAction::Error(_))));
    }

    #[test]
    fn condition_error_stops_loop() {
        let mut ran = false;
        let result = eval_loop(
            || Err(EvalError::new("bad condition").into()),
            || {
                ran = true;
                Ok(Value::Void)
            },
        );
        assert!(result.is_err());
        assert!(!ran);
    }
}

mod bare_blocks {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn out_is_the_block_value() {
        let result = eval_bare_block(|| Err(ControlAction::Out(Value::int(4))));
        assert_eq!(int(&result), Some(4));
    }

    #[test]
    fn jump_and_return_propagate() {
        assert!(matches!(
            eval_bare_block(|| Err(ControlAction::Jump)),
            Err(ControlAction::Jump)
        ));
        assert!(matches!(
            eval_bare_block(|| Err(ControlAction::Return(Value::Void))),
            Err(ControlAction::Return(Value::Void))
        ));
    }
}

mod boundaries {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn return_is_the_call_value() {
        let result = finish_call(Err(ControlAction::Return(Value::int(1))));
        assert_eq!(int(&result), Some(1));
    }

    #[test]
    fn stray_out_at_call_is_error() {
        let Err(ControlAction::Error(error)) = finish_call(Err(ControlAction::Out(Value::Void)))
        else {
            panic!("expected an error");
        };
        assert_eq!(
            error.kind(),
            &EvalErrorKind::SignalOutsideBoundary {
                signal: TypeTag::Out,
                boundary: "function",
            }
        );
    }

    #[test]
    fn stray_jump_at_call_is_error() {
        assert!(matches!(
            finish_call(Err(ControlAction::Jump)),
            Err(ControlAction::Error(_))
        ));
    }

    #[test]
    fn program_surfaces_errors() {
        let error = run_top_level(Err(EvalError::new("boom").into()));
        assert_eq!(
            error.map_err(|e| e.message().to_string()).err(),
            Some("boom".to_string())
        );
    }

    #[test]
    fn program_return_is_its_value() {
        let value = run_top_level(Err(ControlAction::Return(Value::int(3))));
        assert_eq!(value.ok().as_ref().and_then(Value::as_int), Some(3));
    }

    #[test]
    fn program_rejects_stray_jump() {
        let error = run_top_level(Err(ControlAction::Jump));
        assert!(matches!(
            error.as_ref().map_err(EvalError::kind),
            Err(EvalErrorKind::SignalOutsideBoundary {
                signal: TypeTag::Jump,
                ..
            })
        ));
    }
}
