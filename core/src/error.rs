use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Nickname must be at least {min} characters")]
    NicknameTooShort { min: usize },
    #[error("Please enter a number")]
    GuessNotANumber,
    #[error("Guess must be between {min} and {max}")]
    GuessOutOfRange { min: u32, max: u32 },
    #[error("Round is not in progress, input ignored")]
    NotPlaying,
    #[error("Unknown game")]
    UnknownGame,
}

pub type Result<T> = core::result::Result<T, GameError>;
