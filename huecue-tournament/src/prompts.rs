//! Prompt text sent to clue-givers and guessers

use huecue_core::{Color, Coordinate};

const BOARD_DESCRIPTION: &str = "The board has 480 colours in a grid of 20 rows (A-T) and \
24 columns (1-24). Columns sweep the hue circle: reds (1-2), oranges (3-4), yellows (5-6), \
greens (7-10), teals (11-12), blues (13-17), purples (18-20), pinks (21-24). Rows A-E are \
pastels, F-O are vivid, P-T are dark.";

/// Prompt for the clue-giver, who alone sees the target
pub fn clue_giver_prompt(target: Coordinate, color: Color) -> String {
    format!(
        "You are the CLUE GIVER in a colour guessing game.\n\n\
         Your secret target is cell {target}, colour {color}.\n\n\
         {BOARD_DESCRIPTION}\n\n\
         Give a ONE-WORD clue (no spaces, no hyphens, no colour names) that leads the \
         other players to this exact colour.\n\n\
         Respond with ONLY JSON: {{\"clue\": \"YourWord\", \"reasoning\": \"Why\"}}"
    )
}

/// Prompt for a guesser; carries only the clue, never the target
pub fn guesser_prompt(clue: &str) -> String {
    format!(
        "You are guessing in a colour guessing game. The clue is: \"{clue}\"\n\n\
         {BOARD_DESCRIPTION}\n\n\
         Name the single cell that best matches the clue, written as RowColumn (e.g. K12).\n\n\
         Respond with ONLY JSON: {{\"guess\": \"K12\", \"reasoning\": \"Why\"}}"
    )
}
