use crate::ui::drivers::intent::DriverManagerIntent;
use crate::ui::drivers::state::DriverManagerState;
use crate::ui::mvi::Reducer;

pub struct DriverManagerReducer;

impl Reducer for DriverManagerReducer {
    type State = DriverManagerState;
    type Intent = DriverManagerIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            DriverManagerIntent::Load { drivers } => DriverManagerState::Visible {
                drivers,
                focused: 0,
                last_result: None,
                confirm_delete: None,
                import_path: None,
            },
            DriverManagerIntent::Close => DriverManagerState::Hidden,
            DriverManagerIntent::MoveUp => match state {
                DriverManagerState::Visible {
                    drivers,
                    focused,
                    last_result,
                    confirm_delete: None,
                    import_path: None,
                } => {
                    let focused = if focused == 0 {
                        drivers.len().saturating_sub(1)
                    } else {
                        focused - 1
                    };
                    DriverManagerState::Visible {
                        drivers,
                        focused,
                        last_result,
                        confirm_delete: None,
                        import_path: None,
                    }
                }
                other => other,
            },
            DriverManagerIntent::MoveDown => match state {
                DriverManagerState::Visible {
                    drivers,
                    focused,
                    last_result,
                    confirm_delete: None,
                    import_path: None,
                } => {
                    let focused = if focused + 1 >= drivers.len() {
                        0
                    } else {
                        focused + 1
                    };
                    DriverManagerState::Visible {
                        drivers,
                        focused,
                        last_result,
                        confirm_delete: None,
                        import_path: None,
                    }
                }
                other => other,
            },
            DriverManagerIntent::RequestDelete => match state {
                DriverManagerState::Visible {
                    drivers,
                    focused,
                    last_result,
                    import_path: None,
                    ..
                } => {
                    let confirm_delete = drivers.get(focused).cloned();
                    DriverManagerState::Visible {
                        drivers,
                        focused,
                        last_result,
                        confirm_delete,
                        import_path: None,
                    }
                }
                other => other,
            },
            DriverManagerIntent::CancelDelete => match state {
                DriverManagerState::Visible {
                    drivers,
                    focused,
                    last_result,
                    import_path,
                    ..
                } => DriverManagerState::Visible {
                    drivers,
                    focused,
                    last_result,
                    confirm_delete: None,
                    import_path,
                },
                other => other,
            },
            DriverManagerIntent::OpenImport => match state {
                DriverManagerState::Visible {
                    drivers,
                    focused,
                    last_result,
                    confirm_delete: None,
                    ..
                } => DriverManagerState::Visible {
                    drivers,
                    focused,
                    last_result,
                    confirm_delete: None,
                    import_path: Some(String::new()),
                },
                other => other,
            },
            DriverManagerIntent::ImportChar(ch) => match state {
                DriverManagerState::Visible {
                    drivers,
                    focused,
                    last_result,
                    confirm_delete,
                    import_path: Some(mut path),
                } => {
                    path.push(ch);
                    DriverManagerState::Visible {
                        drivers,
                        focused,
                        last_result,
                        confirm_delete,
                        import_path: Some(path),
                    }
                }
                other => other,
            },
            DriverManagerIntent::ImportBackspace => match state {
                DriverManagerState::Visible {
                    drivers,
                    focused,
                    last_result,
                    confirm_delete,
                    import_path: Some(mut path),
                } => {
                    path.pop();
                    DriverManagerState::Visible {
                        drivers,
                        focused,
                        last_result,
                        confirm_delete,
                        import_path: Some(path),
                    }
                }
                other => other,
            },
            DriverManagerIntent::CancelImport => match state {
                DriverManagerState::Visible {
                    drivers,
                    focused,
                    last_result,
                    confirm_delete,
                    ..
                } => DriverManagerState::Visible {
                    drivers,
                    focused,
                    last_result,
                    confirm_delete,
                    import_path: None,
                },
                other => other,
            },
            DriverManagerIntent::Finished { result, drivers } => match state {
                DriverManagerState::Visible { focused, .. } => {
                    let focused = focused.min(drivers.len().saturating_sub(1));
                    DriverManagerState::Visible {
                        drivers,
                        focused,
                        last_result: Some(result),
                        confirm_delete: None,
                        import_path: None,
                    }
                }
                other => other,
            },
        }
    }
}
