//! Local riddle generation.
//!
//! The always-available counterpart to the remote model: a precomposed
//! template when one exists for the combination, otherwise a document
//! assembled from four lookup tables. The tables are total over the
//! category/era/difficulty cross product, so this path cannot fail.

use crate::puzzle::{Difficulty, Era, PuzzleCategory};
use crate::templates;

/// Opening scenario fragment for a combination.
///
/// Fully populated: every one of the 30 combinations has an entry,
/// unlike the template table.
fn scenario(category: PuzzleCategory, era: Era, difficulty: Difficulty) -> &'static str {
    use Difficulty::*;
    use Era::*;
    use PuzzleCategory::*;

    match (category, era, difficulty) {
        (Death, Ancient, Easy) => "一位古代官员被发现死在自己的书房中，桌上放着一封未完成的遗书...",
        (Death, Ancient, Medium) => "在古代深宫中，一位妃子被发现死在自己的寝宫中，现场没有任何打斗痕迹...",
        (Death, Ancient, Hard) => "古代战场上一位将军的尸体旁有遗言，但他明明说不会写字...",
        (Death, Modern, Easy) => "程序员小李被发现死在家中的电脑前，屏幕上的代码似乎还在运行...",
        (Death, Modern, Medium) => "现代办公室中一位高管被发现死在会议室里，门窗都从内部反锁...",
        (Death, Modern, Hard) => "现代医院里一位医生死在自己的办公室中，死因不明...",

        (Identity, Ancient, Easy) => "在古代集市上出现了两个完全相同的人，连家人都无法分辨...",
        (Identity, Ancient, Medium) => "古代客栈里住着一个人，但所有客人都说他有两个...",
        (Identity, Ancient, Hard) => "古代皇室中出现了两个太子，连皇帝都无法区分...",
        (Identity, Modern, Easy) => "现代城市中出现了两个完全相同的双胞胎，但DNA检测显示不是亲兄弟...",
        (Identity, Modern, Medium) => "现代公司里员工发现他们老板有两个，但两个都很真实...",
        (Identity, Modern, Hard) => "现代机场出现了两个身份证相同的人，但两人都说自己是真的...",

        (Behavior, Ancient, Easy) => "古代僧人每天都会在特定时间敲钟，但奇怪的是钟声总是从不同方向传来...",
        (Behavior, Ancient, Medium) => "古代商人每天都会在同一个时间同一个地点消失一个时辰...",
        (Behavior, Ancient, Hard) => "古代书生每天都会在晚上读书，但奇怪的是书页总是自动翻页...",
        (Behavior, Modern, Easy) => "现代程序员每天凌晨都会准时重启电脑，但重启后所有程序都正常...",
        (Behavior, Modern, Medium) => "现代司机每天都会在同一时间同一地点停车20分钟...",
        (Behavior, Modern, Hard) => "现代作家每天都会在同一时间写作，但奇怪的是文档总是自动保存...",

        (Mystery, Ancient, Easy) => "古代村落中每到月圆之夜就会发生奇怪的事情...",
        (Mystery, Ancient, Medium) => "古代宫殿中某间房间总是传来奇怪的声音...",
        (Mystery, Ancient, Hard) => "古代书房中的书总是神秘地消失和出现...",
        (Mystery, Modern, Easy) => "现代办公楼中某间办公室总是自动开灯关灯...",
        (Mystery, Modern, Medium) => "现代住宅中某间房间总是有奇怪的气味...",
        (Mystery, Modern, Hard) => "现代实验室中的设备总是神秘地重新启动...",

        (Logic, Ancient, Easy) => "古代智者说：我明天要说谎，但这句话本身是真话...",
        (Logic, Ancient, Medium) => "古代裁判说：下一个说话的人将获得奖励，但他自己说话了...",
        (Logic, Ancient, Hard) => "古代预言家说：我的预言将是假的，但这句话本身是真预言...",
        (Logic, Modern, Easy) => "现代程序员说：我的代码明天会有bug，但这句话本身是正确的...",
        (Logic, Modern, Medium) => "现代律师说：下一个发言的当事人将败诉，但他自己发言了...",
        (Logic, Modern, Hard) => "现代科学家说：我的研究结论是错误的，但这个结论本身是正确的...",
    }
}

/// Clue list per difficulty tier: 4 for easy, 3 for medium, 2 for hard.
fn clues(difficulty: Difficulty) -> &'static [&'static str] {
    match difficulty {
        Difficulty::Easy => &[
            "线索1：有一些明显的事实线索",
            "线索2：环境信息提供了重要提示",
            "线索3：时间线显示异常情况",
            "线索4：物证显示关键信息",
        ],
        Difficulty::Medium => &[
            "线索1：环境信息暗示关键信息",
            "线索2：时间线显示重要异常",
            "线索3：物证需要逻辑推理",
        ],
        Difficulty::Hard => &[
            "线索1：需要深度思考的隐含信息",
            "线索2：需要逻辑推理的关键线索",
        ],
    }
}

/// Reasoning walkthrough per difficulty tier.
fn reasoning(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => {
            "通过逐步分析线索，我们可以得出合理解释。线索1和2告诉我们基本情况，线索3和4提供了关键突破点。"
        }
        Difficulty::Medium => {
            "需要通过逻辑推理和排除法来解决这个谜题。每个线索都指向特定的可能性，需要综合分析。"
        }
        Difficulty::Hard => {
            "这是一个需要深度思考和复杂逻辑推理的谜题。每个线索都包含多重含义，需要仔细分析。"
        }
    }
}

/// Concluding answer fragment per category.
fn solution(category: PuzzleCategory) -> &'static str {
    match category {
        PuzzleCategory::Death => {
            "通过分析线索，我们可以推断出死亡的真正原因和过程。每个异常现象背后都有合理的解释。"
        }
        PuzzleCategory::Identity => {
            "通过仔细分析身份相关信息，我们可以发现看似不可能的谜题背后的真相。"
        }
        PuzzleCategory::Behavior => {
            "通过分析行为模式和异常现象，我们可以理解看似不合理的行为背后的逻辑。"
        }
        PuzzleCategory::Mystery => {
            "通过分析神秘现象和异常事件，我们可以找出超自然现象背后的理性解释。"
        }
        PuzzleCategory::Logic => {
            "通过仔细分析逻辑悖论和矛盾，我们可以理解看似不可能的逻辑问题的真正含义。"
        }
    }
}

/// Assemble a riddle document from the component tables.
///
/// Total over the enumerated input domain; the output always carries all
/// four section headings and the difficulty's clue count.
pub fn dynamic_puzzle(category: PuzzleCategory, era: Era, difficulty: Difficulty) -> String {
    let scenario = scenario(category, era, difficulty);
    let clue_list = clues(difficulty);
    let numbered_clues = clue_list
        .iter()
        .enumerate()
        .map(|(index, clue)| format!("{}. {clue}", index + 1))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "## 🐢 海龟汤谜题

### 谜面（情境描述）
{scenario}

### 关键线索（{count}个）
{numbered_clues}

### 推理过程
{reasoning}

### 最终答案
{answer}

🎮 玩法提示：这是动态生成的海龟汤谜题，你可以和朋友一起尝试推理，享受逻辑思维的乐趣！",
        count = clue_list.len(),
        reasoning = reasoning(difficulty),
        answer = solution(category),
    )
}

/// Produce a riddle locally: precomposed template if one exists for the
/// combination, otherwise a dynamically assembled document.
pub fn local_puzzle(category: PuzzleCategory, era: Era, difficulty: Difficulty) -> String {
    match templates::lookup(category, era, difficulty) {
        Some(template) => template.to_string(),
        None => dynamic_puzzle(category, era, difficulty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECTION_HEADINGS: [&str; 4] = [
        "### 谜面（情境描述）",
        "### 关键线索",
        "### 推理过程",
        "### 最终答案",
    ];

    fn all_combinations() -> impl Iterator<Item = (PuzzleCategory, Era, Difficulty)> {
        PuzzleCategory::ALL.into_iter().flat_map(|c| {
            Era::ALL
                .into_iter()
                .flat_map(move |e| Difficulty::ALL.into_iter().map(move |d| (c, e, d)))
        })
    }

    #[test]
    fn test_dynamic_puzzle_total_over_domain() {
        for (category, era, difficulty) in all_combinations() {
            let doc = dynamic_puzzle(category, era, difficulty);
            assert!(!doc.is_empty());
            for heading in SECTION_HEADINGS {
                assert!(
                    doc.contains(heading),
                    "{category}/{era}/{difficulty} missing {heading}"
                );
            }
        }
    }

    #[test]
    fn test_clue_count_matches_difficulty() {
        for (category, era, difficulty) in all_combinations() {
            let doc = dynamic_puzzle(category, era, difficulty);
            let expected = difficulty.clue_count();

            // Heading shows the count, and each clue line carries its
            // 1-based index prefix.
            assert!(doc.contains(&format!("### 关键线索（{expected}个）")));
            for i in 1..=expected {
                assert!(doc.contains(&format!("{i}. 线索{i}：")));
            }
            assert!(!doc.contains(&format!("{}. 线索", expected + 1)));
        }
    }

    #[test]
    fn test_scenario_embedded() {
        let doc = dynamic_puzzle(PuzzleCategory::Logic, Era::Modern, Difficulty::Hard);
        assert!(doc.contains("现代科学家说"));
    }

    #[test]
    fn test_ends_with_engagement_hint() {
        let doc = dynamic_puzzle(PuzzleCategory::Mystery, Era::Ancient, Difficulty::Medium);
        assert!(doc.ends_with("享受逻辑思维的乐趣！"));
    }

    #[test]
    fn test_local_puzzle_prefers_template() {
        let doc = local_puzzle(PuzzleCategory::Death, Era::Ancient, Difficulty::Easy);
        let template =
            templates::lookup(PuzzleCategory::Death, Era::Ancient, Difficulty::Easy).unwrap();
        assert_eq!(doc, template);
        // The template path carries no engagement hint line.
        assert!(!doc.contains("🎮 玩法提示"));
    }

    #[test]
    fn test_local_puzzle_delegates_on_miss() {
        let doc = local_puzzle(PuzzleCategory::Death, Era::Modern, Difficulty::Easy);
        assert_eq!(
            doc,
            dynamic_puzzle(PuzzleCategory::Death, Era::Modern, Difficulty::Easy)
        );
    }

    #[test]
    fn test_local_puzzle_never_empty() {
        for (category, era, difficulty) in all_combinations() {
            assert!(!local_puzzle(category, era, difficulty).is_empty());
        }
    }
}
