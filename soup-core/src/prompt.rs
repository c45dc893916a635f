//! Prompt construction for remote riddle generation.
//!
//! A pure mapping from the three riddle dimensions to the instruction
//! text sent to the model. The document structure requested here matches
//! what the local generator produces, so remote and fallback output read
//! the same to the player.

use crate::puzzle::{Difficulty, Era, PuzzleCategory};

/// Setting description embedded in the prompt for each era.
fn era_context(era: Era) -> &'static str {
    match era {
        Era::Ancient => "古代背景（可包含古代服饰、建筑、社会背景）",
        Era::Modern => "现代背景（可包含现代科技、城市生活、社会现象）",
    }
}

/// Complexity description embedded in the prompt for each difficulty.
fn difficulty_context(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "简单（给3-4个明显线索，新手可解）",
        Difficulty::Medium => "中等（给2-3个关键线索，需要逻辑推理）",
        Difficulty::Hard => "困难（给1-2个隐藏线索，需要深度思考）",
    }
}

/// Build the generation instruction for one riddle.
///
/// Pure: identical inputs always produce identical prompts.
pub fn build_prompt(category: PuzzleCategory, era: Era, difficulty: Difficulty) -> String {
    format!(
        "请创作一个海龟汤逻辑推理谜题。

要求：
- 谜题类型：{category}
- 背景设定：{era}
- 复杂度：{difficulty}
- 语言：中文
- 格式：请用markdown格式，按以下结构：

## 🐢 海龟汤谜题

### 谜面（情境描述）
描述一个看似不可能或令人困惑的情境

### 关键线索（1-4个）
提供帮助推理的重要线索

### 推理过程
展示完整的逻辑推理步骤

### 最终答案
揭示事情真相和完整故事

请确保谜题有趣、逻辑严密、答案合理。海龟汤的魅力在于通过有限的线索推理出令人意想不到的真相。",
        category = category.label(),
        era = era_context(era),
        difficulty = difficulty_context(difficulty),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_pure() {
        let a = build_prompt(PuzzleCategory::Death, Era::Ancient, Difficulty::Easy);
        let b = build_prompt(PuzzleCategory::Death, Era::Ancient, Difficulty::Easy);
        assert_eq!(a, b);
    }

    #[test]
    fn test_prompt_embeds_labels() {
        for category in PuzzleCategory::ALL {
            for era in Era::ALL {
                for difficulty in Difficulty::ALL {
                    let prompt = build_prompt(category, era, difficulty);
                    assert!(prompt.contains(category.label()));
                    assert!(prompt.contains(era_context(era)));
                    assert!(prompt.contains(difficulty_context(difficulty)));
                }
            }
        }
    }

    #[test]
    fn test_single_dimension_changes_prompt() {
        let base = build_prompt(PuzzleCategory::Death, Era::Ancient, Difficulty::Easy);

        let other_category = build_prompt(PuzzleCategory::Logic, Era::Ancient, Difficulty::Easy);
        assert_ne!(base, other_category);
        assert!(other_category.contains(PuzzleCategory::Logic.label()));
        assert!(!other_category.contains(PuzzleCategory::Death.label()));

        let other_era = build_prompt(PuzzleCategory::Death, Era::Modern, Difficulty::Easy);
        assert_ne!(base, other_era);

        let other_difficulty = build_prompt(PuzzleCategory::Death, Era::Ancient, Difficulty::Hard);
        assert_ne!(base, other_difficulty);
    }

    #[test]
    fn test_prompt_requests_all_sections() {
        let prompt = build_prompt(PuzzleCategory::Mystery, Era::Modern, Difficulty::Medium);
        assert!(prompt.contains("### 谜面（情境描述）"));
        assert!(prompt.contains("### 关键线索"));
        assert!(prompt.contains("### 推理过程"));
        assert!(prompt.contains("### 最终答案"));
    }
}
