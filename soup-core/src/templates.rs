//! Precomposed riddle documents.
//!
//! A handful of hand-written riddles keyed by `era_category_difficulty`.
//! Only 5 of the 30 possible keys are populated; every other combination
//! falls through to the dynamic generator. A miss here is the normal
//! case, not an error.

use crate::puzzle::{Difficulty, Era, PuzzleCategory};
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Build the composite lookup key for a combination.
pub fn template_key(category: PuzzleCategory, era: Era, difficulty: Difficulty) -> String {
    format!("{}_{}_{}", era.key(), category.key(), difficulty.key())
}

/// Look up a precomposed riddle for the combination, if one exists.
pub fn lookup(
    category: PuzzleCategory,
    era: Era,
    difficulty: Difficulty,
) -> Option<&'static str> {
    TEMPLATES
        .get(template_key(category, era, difficulty).as_str())
        .copied()
}

lazy_static! {
    static ref TEMPLATES: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();
        map.insert("ancient_death_easy", ANCIENT_DEATH_EASY);
        map.insert("modern_mystery_medium", MODERN_MYSTERY_MEDIUM);
        map.insert("ancient_identity_hard", ANCIENT_IDENTITY_HARD);
        map.insert("modern_behavior_easy", MODERN_BEHAVIOR_EASY);
        map.insert("ancient_logic_medium", ANCIENT_LOGIC_MEDIUM);
        map
    };
}

const ANCIENT_DEATH_EASY: &str = "## 🐢 海龟汤谜题

### 谜面（情境描述）
一位古代大臣清晨被发现死在自己的书房中，桌上放着一封未写完的遗书，房门紧锁，钥匙在死者身上。

### 关键线索
1. 遗书只写了一半就停了
2. 书房位于三楼，跳窗自杀不可能
3. 死者的茶杯里有苦味
4. 管家说昨晚听到奇怪的声音

### 推理过程
从线索1和2可以推断，这不是自杀。从线索4和死者茶杯的苦味可以推断是中毒。

### 最终答案
大臣是被毒杀的。凶手是他的妻子，在茶杯里下毒，然后利用管家听到的声音制造不在场证明。";

const MODERN_MYSTERY_MEDIUM: &str = "## 🐢 海龟汤谜题

### 谜面（情境描述）
程序员小李被发现死在家中电脑前，屏幕上显示着他正在编写的代码，警察发现门锁完好，窗户紧闭。

### 关键线索
1. 电脑屏幕上的代码最后几行是乱码
2. 小李的习惯是在睡前喝咖啡，但今天咖啡杯是满的
3. 地上有一滩水迹
4. 邻居说昨晚听到类似重物落地的声音

### 推理过程
从线索1的乱码和线索3的水迹可以推断是触电。线索2显示小李没有喝咖啡，说明在他预期要睡觉时发生了意外。

### 最终答案
小李是在修电脑时触电身亡的。他拔掉电源后，误以为安全，但静电仍然存在，触碰电路时触电死亡。水迹是他倒下时打翻的水杯造成的。";

const ANCIENT_IDENTITY_HARD: &str = "## 🐢 海龟汤谜题

### 谜面（情境描述）
在古代京城一家客栈里，一个穿着华丽服饰的人被发现死在自己的房间里奇怪的是房间里还有另一个人，穿着同样的衣服，有着相同的面容。

### 关键线索
1. 两人的服饰完全相同，但材质新旧不同
2. 死者的钱包里有贵重物品，而活人的钱包很轻
3. 活人说话有些结巴，而死者生前口才很好
4. 客栈老板说昨晚只看到一个人进房间

### 推理过程
从线索1和2可以推断，这不是双胞胎案件。线索3和4说明房间内只有一个人。

### 最终答案
这是同一个人。死者在房间内换装，将新衣服穿在身上，旧的留在地上。钱包是道具，为了营造假象。最后用某种方法制造了自己的\"死亡\"，然后离开。";

const MODERN_BEHAVIOR_EASY: &str = "## 🐢 海龟汤谜题

### 谜面（情境描述）
小明每天都会在凌晨3点准时从10楼跳下，但每次都能毫发无伤地回到房间，第二天继续。

### 关键线索
1. 小明没有任何超能力
2. 每次跳下后第二天精神很好
3. 楼下有个巨大的气垫床
4. 小明的房间在10楼

### 推理过程
从线索1和3可以推断，这不是超自然现象，而是有物理基础的。

### 最终答案
小明是在训练消防员的跳伞技能。每天凌晨3点跳下气垫床，第二天恢复。这是他作为消防员的日常训练。";

const ANCIENT_LOGIC_MEDIUM: &str = "## 🐢 海龟汤谜题

### 谜面（情境描述）
一位古代将军下令处死所有说谎的人，但第二天早上，所有说真话的人都被处死了。

### 关键线索
1. 将军的话是真实的命令
2. 将军自己也被处死了
3. 处死方式是根据每个人的罪行
4. 将军没有违反自己的命令

### 推理过程
从线索1和2可以推断，将军说了真话。从线索3和4可以推断，每个人都按自己罪行被处死。

### 最终答案
将军宣布\"说谎的人都要被处死\"。这句话本身就是真话，但将军随后说了一个更大的谎：他自己没有说谎。结果，因为说谎，他被自己处死了。";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_key_format() {
        assert_eq!(
            template_key(PuzzleCategory::Death, Era::Ancient, Difficulty::Easy),
            "ancient_death_easy"
        );
        assert_eq!(
            template_key(PuzzleCategory::Mystery, Era::Modern, Difficulty::Medium),
            "modern_mystery_medium"
        );
    }

    #[test]
    fn test_exactly_five_templates() {
        assert_eq!(TEMPLATES.len(), 5);
    }

    #[test]
    fn test_hit_returns_precomposed_document() {
        let doc = lookup(PuzzleCategory::Death, Era::Ancient, Difficulty::Easy).unwrap();
        assert_eq!(doc, ANCIENT_DEATH_EASY);
        assert!(doc.starts_with("## 🐢 海龟汤谜题"));
    }

    #[test]
    fn test_miss_returns_none() {
        assert!(lookup(PuzzleCategory::Death, Era::Modern, Difficulty::Easy).is_none());
        assert!(lookup(PuzzleCategory::Logic, Era::Modern, Difficulty::Hard).is_none());
    }

    #[test]
    fn test_populated_combinations() {
        let hits: usize = PuzzleCategory::ALL
            .iter()
            .flat_map(|&c| {
                Era::ALL.iter().flat_map(move |&e| {
                    Difficulty::ALL
                        .iter()
                        .map(move |&d| lookup(c, e, d).is_some() as usize)
                })
            })
            .sum();
        assert_eq!(hits, 5);
    }
}
