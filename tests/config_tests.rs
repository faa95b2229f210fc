use munbank::{classify::client::ClassifierClient, config::ModelEnv};

fn clear_env() {
    // SAFETY: this integration-test binary is the only process touching these
    // variables, and each test re-establishes the state it needs.
    unsafe {
        std::env::remove_var("OPENAI_ENDPOINT");
        std::env::remove_var("OPENAI_API_KEY");
        std::env::remove_var("OPENAI_MODEL");
        std::env::remove_var("OPENAI_TEMPERATURE");
    }
}

#[test]
fn model_env_requires_all_mandatory_variables() {
    clear_env();
    assert!(ModelEnv::from_env().is_none());
    assert!(ClassifierClient::from_env().is_none());

    unsafe {
        std::env::set_var("OPENAI_ENDPOINT", "https://api.example.com/v1");
        std::env::set_var("OPENAI_API_KEY", "sk-test");
    }
    assert!(ModelEnv::from_env().is_none());

    unsafe {
        std::env::set_var("OPENAI_MODEL", "gpt-4o-mini");
        std::env::set_var("OPENAI_TEMPERATURE", "0.2");
    }
    let env = ModelEnv::from_env().expect("complete env");
    assert_eq!(env.api_base(), "https://api.example.com/v1");
    assert_eq!(env.model(), "gpt-4o-mini");
    assert_eq!(env.temperature(), Some(0.2));
    assert!(ClassifierClient::from_env().is_some());

    clear_env();
}
