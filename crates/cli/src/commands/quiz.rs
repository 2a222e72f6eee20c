use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use pifloor_core::config::AppConfig;
use pifloor_core::{AnswerSet, Catalog, Questionnaire, QuizSession, QuizStep};
use tracing::info;

use super::recommend::engine_for;
use super::{load_catalog, render_recommendations, CommandResult};

const HELP: &str = "Digite o número da opção, `n` para avançar, `v` para voltar ou `q` para sair.";

enum QuizOutcome {
    Finished(AnswerSet),
    Quit,
}

/// Runs the questionnaire over `input`/`output` and prints the shortlist.
pub fn run<R, W>(config: &AppConfig, catalog: Option<&Path>, input: R, mut output: W) -> CommandResult
where
    R: BufRead,
    W: Write,
{
    // products are loaded before the first question is shown
    let catalog = match load_catalog(catalog, config) {
        Ok(catalog) => catalog,
        Err(error) => return CommandResult::from_error("quiz", error),
    };

    match walk(input, &mut output) {
        Ok(QuizOutcome::Finished(answers)) => CommandResult::text(finish(config, &catalog, &answers)),
        Ok(QuizOutcome::Quit) => CommandResult::failure("quiz", "quiz_aborted", "quiz abandoned", 1),
        Err(error) => CommandResult::failure("quiz", "io", format!("{error:#}"), 1),
    }
}

fn finish(config: &AppConfig, catalog: &Catalog, answers: &AnswerSet) -> String {
    let scored = engine_for(config).recommend_scored(answers, catalog.products());
    info!(
        event_name = "cli.quiz.finished",
        answered = answers.len(),
        returned = scored.len(),
        "quiz finished"
    );
    render_recommendations(&scored)
}

fn walk<R, W>(input: R, output: &mut W) -> Result<QuizOutcome>
where
    R: BufRead,
    W: Write,
{
    let mut session = QuizSession::new(Questionnaire::floor_picker())?;
    let mut lines = input.lines();

    writeln!(output, "Encontre seu Piso Ideal\n{HELP}")?;
    loop {
        render_question(&session, output)?;

        let Some(line) = lines.next() else {
            return Ok(QuizOutcome::Quit);
        };
        let line = line.context("failed to read quiz input")?;

        let response = match line.trim() {
            "q" => return Ok(QuizOutcome::Quit),
            "v" => session.previous().map(|_| ()),
            "n" | "" => match session.next() {
                Ok(QuizStep::Finished(answers)) => return Ok(QuizOutcome::Finished(answers)),
                Ok(QuizStep::Question(_)) => Ok(()),
                Err(error) => Err(error),
            },
            choice => match choice.parse::<usize>() {
                Ok(number) if (1..=session.current().options.len()).contains(&number) => {
                    let option = session.current().options[number - 1].clone();
                    session.select(&option)
                }
                _ => {
                    writeln!(output, "Opção inválida. {HELP}")?;
                    continue;
                }
            },
        };

        if let Err(error) = response {
            writeln!(output, "! {error}")?;
        }
    }
}

fn render_question<W: Write>(session: &QuizSession, output: &mut W) -> Result<()> {
    let question = session.current();
    writeln!(
        output,
        "\nPergunta {} de {} ({:.0}%)\n{}",
        session.index() + 1,
        session.question_count(),
        session.progress_percent(),
        question.prompt
    )?;
    for (position, option) in question.options.iter().enumerate() {
        let marker = if session.is_selected(option) { "x" } else { " " };
        writeln!(output, "  [{marker}] {}. {option}", position + 1)?;
    }
    let action = if session.is_last() { "Ver resultado" } else { "Próxima" };
    writeln!(output, "> ({action})")?;
    Ok(())
}
