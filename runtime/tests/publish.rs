use std::sync::Arc;

use parking_lot::Mutex;
use scenario_core::Model;
use scenario_runtime::{Runner, RunnerError, RunnerHandle};

struct AsksQuestion(String);
struct GivesAnswer(String);
struct Kickoff;

fn asker_model() -> Model {
    Model::builder()
        .use_case("ask the expert")
        .basic_flow()
        .step("S1")
        .on::<AsksQuestion>()
        .system_publish(|question: &AsksQuestion| GivesAnswer(format!("re: {}", question.0)))
        .to("expert")
        .build()
        .unwrap()
}

fn expert_model(answers: Arc<Mutex<Vec<String>>>) -> Model {
    Model::builder()
        .use_case("answer questions")
        .basic_flow()
        .step("T1")
        .on::<GivesAnswer>()
        .system({
            let answers = Arc::clone(&answers);
            move |answer: &GivesAnswer| {
                answers.lock().push(answer.0.clone());
            }
        })
        .build()
        .unwrap()
}

#[test]
fn published_output_reaches_the_connected_runner() -> anyhow::Result<()> {
    let answers = Arc::new(Mutex::new(Vec::new()));

    let expert = RunnerHandle::new(Runner::new());
    expert.lock().run(Arc::new(expert_model(Arc::clone(&answers))))?;

    let mut asker = Runner::new();
    asker.connect("expert", expert.clone());
    asker.run(Arc::new(asker_model()))?;

    asker.react_to(Box::new(AsksQuestion("why?".to_string())))?;
    assert_eq!(answers.lock().as_slice(), ["re: why?".to_string()]);
    Ok(())
}

#[test]
fn publishing_without_a_connected_runner_fails() -> anyhow::Result<()> {
    let mut asker = Runner::new();
    asker.run(Arc::new(asker_model()))?;

    let error = asker
        .react_to(Box::new(AsksQuestion("why?".to_string())))
        .unwrap_err();
    match error {
        RunnerError::UnknownRecipient { actor } => assert_eq!(actor, "expert"),
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

#[test]
fn automatic_step_publishes_too() -> anyhow::Result<()> {
    let answers = Arc::new(Mutex::new(Vec::new()));

    let expert = RunnerHandle::new(Runner::new());
    expert.lock().run(Arc::new(expert_model(Arc::clone(&answers))))?;

    let model = Arc::new(
        Model::builder()
            .use_case("broadcast")
            .basic_flow()
            .step("S1")
            .on::<Kickoff>()
            .system(|_| {})
            .step("S2")
            .system_publish(|| GivesAnswer("scheduled".to_string()))
            .to("expert")
            .build()
            .unwrap(),
    );

    let mut broadcaster = Runner::new();
    broadcaster.connect("expert", expert.clone());
    broadcaster.run(model)?;
    // S2 needs no message; it runs in the auto pass after S1 and its
    // output is forwarded.
    broadcaster.react_to(Box::new(Kickoff))?;

    assert_eq!(answers.lock().as_slice(), ["scheduled".to_string()]);
    Ok(())
}
