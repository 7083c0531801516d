//! Interactive drill over a quiz session
//!
//! Reads one line at a time. Plain lines are answers; lines starting with
//! `:` are commands. Every wait (speech, the pause after a correct answer)
//! is awaited in sequence on the calling task.

use super::session::{QuizSession, Stats, Verdict};
use crate::speech::SpeechDispatcher;
use crate::state::{on_off, Settings};
use crate::Result;
use log::{debug, info};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

const HELP: &str = "Commands: :next (:n), :prev (:p), :speak (:s), :speech, :sound, :quit (:q)";

/// Terminal bell, used for sound cues
const BELL: &str = "\x07";

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Blank,
    Next,
    Prev,
    Speak,
    ToggleSpeech,
    ToggleSound,
    Quit,
    Help,
    Answer(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Input::Blank;
        }
        match line {
            ":next" | ":n" => Input::Next,
            ":prev" | ":p" => Input::Prev,
            ":speak" | ":s" => Input::Speak,
            ":speech" => Input::ToggleSpeech,
            ":sound" => Input::ToggleSound,
            ":quit" | ":q" => Input::Quit,
            _ if line.starts_with(':') => Input::Help,
            answer => Input::Answer(answer.to_string()),
        }
    }
}

/// Runs a session against line input and text output
pub struct Drill<R, W> {
    session: QuizSession,
    title: String,
    speech: Option<SpeechDispatcher>,
    settings: Settings,
    input: Lines<R>,
    output: W,
}

impl<R, W> Drill<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(
        session: QuizSession,
        title: impl Into<String>,
        speech: Option<SpeechDispatcher>,
        settings: Settings,
        input: R,
        output: W,
    ) -> Self {
        Self {
            session,
            title: title.into(),
            speech,
            settings,
            input: input.lines(),
            output,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Run until the session finishes, the learner quits or input ends
    pub async fn run(&mut self) -> Result<Stats> {
        info!("Starting drill '{}' with {} words", self.title, self.session.len());
        writeln!(self.output, "{}  ({} words)", self.title, self.session.len())?;
        writeln!(self.output, "{}", HELP)?;
        self.present().await?;

        while !self.session.is_finished() {
            let Some(line) = self.input.next_line().await? else {
                debug!("Input closed");
                break;
            };

            match Input::parse(&line) {
                Input::Blank => {}
                Input::Next => {
                    self.session.advance();
                    self.present().await?;
                }
                Input::Prev => {
                    let before = self.session.position();
                    if self.session.retreat() != before {
                        self.present().await?;
                    }
                }
                Input::Speak => {
                    if self.settings.speak_enabled {
                        self.speak_current().await;
                    } else {
                        writeln!(self.output, "Turn speech on first (:speech)")?;
                    }
                }
                Input::ToggleSpeech => {
                    let on = self.settings.toggle_speak();
                    writeln!(self.output, "Speech {}", on_off(on))?;
                }
                Input::ToggleSound => {
                    let on = self.settings.toggle_sound();
                    writeln!(self.output, "Sound {}", on_off(on))?;
                }
                Input::Quit => break,
                Input::Help => writeln!(self.output, "{}", HELP)?,
                Input::Answer(answer) => self.answer(&answer).await?,
            }
            self.output.flush()?;
        }

        let stats = self.session.stats();
        info!(
            "Drill ended: {} correct, {} incorrect",
            stats.correct, stats.incorrect
        );
        Ok(stats)
    }

    /// Show the current item, or the completion message once finished
    async fn present(&mut self) -> Result<()> {
        let Some(item) = self.session.current() else {
            let stats = self.session.stats();
            writeln!(self.output, "Well done! You finished {}", self.title)?;
            writeln!(
                self.output,
                "Correct: {} | Incorrect: {}",
                stats.correct, stats.incorrect
            )?;
            return Ok(());
        };

        let (shown, total) = self.session.progress();
        match &item.part_of_speech {
            Some(pos) => writeln!(self.output, "[{}/{}] {}  ({})", shown, total, item.prompt, pos)?,
            None => writeln!(self.output, "[{}/{}] {}", shown, total, item.prompt)?,
        }
        self.output.flush()?;

        if self.settings.speak_enabled {
            self.speak_current().await;
        }
        Ok(())
    }

    /// Speak the current word; the outcome is only logged
    async fn speak_current(&mut self) {
        let Some(word) = self.session.current().map(|item| item.word.clone()) else {
            return;
        };
        if let Some(speech) = self.speech.as_mut() {
            let spoken = speech.speak(&word).await;
            debug!("Spoke '{}': {}", word, spoken);
        }
    }

    async fn answer(&mut self, answer: &str) -> Result<()> {
        match self.session.record_result(answer) {
            None => {}
            Some(Verdict::Correct { advance_after }) => {
                writeln!(self.output, "✓ Correct!")?;
                self.cue(1)?;
                self.output.flush()?;
                tokio::time::sleep(advance_after).await;
                self.session.advance();
                self.present().await?;
            }
            Some(Verdict::Incorrect { answer }) => {
                writeln!(self.output, "✗ Incorrect! Correct answer: {}", answer)?;
                self.cue(2)?;
            }
        }
        Ok(())
    }

    fn cue(&mut self, rings: usize) -> Result<()> {
        if self.settings.sound_enabled {
            write!(self.output, "{}", BELL.repeat(rings))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(Input::parse("  "), Input::Blank);
        assert_eq!(Input::parse(":n"), Input::Next);
        assert_eq!(Input::parse(":prev"), Input::Prev);
        assert_eq!(Input::parse(":speech"), Input::ToggleSpeech);
        assert_eq!(Input::parse(":what"), Input::Help);
        assert_eq!(Input::parse(" Cat "), Input::Answer("Cat".to_string()));
    }
}
