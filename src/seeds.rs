//! Built-in sentence levels so the game is playable without any config file.

use std::collections::BTreeMap;

use crate::domain::{Corpus, SentenceRecord};

/// Minimal leveled corpus: short sentences first, longer clauses later.
pub fn seed_corpus() -> Corpus {
  let mut levels = BTreeMap::new();

  levels.insert(1, vec![
    SentenceRecord::new("我很開心。", "主詞 + be 動詞 + 形容詞", &["I", "am", "happy."]),
    SentenceRecord::new("這是一本書。", "This is + a + 名詞", &["This", "is", "a", "book."]),
    SentenceRecord::new("她喜歡貓。", "第三人稱單數動詞要加 s", &["She", "likes", "cats."]),
    SentenceRecord::new("我們是朋友。", "複數主詞搭配 are", &["We", "are", "friends."]),
  ]);

  levels.insert(2, vec![
    SentenceRecord::new("我每天早上喝咖啡。", "時間副詞放在句尾", &["I", "drink", "coffee", "every", "morning."]),
    SentenceRecord::new("他正在公園裡跑步。", "現在進行式：be + V-ing", &["He", "is", "running", "in", "the", "park."]),
    SentenceRecord::new("你昨天去哪裡了？", "過去式疑問句用 did", &["Where", "did", "you", "go", "yesterday?"]),
  ]);

  levels.insert(3, vec![
    SentenceRecord::new(
      "貓坐在門邊的墊子上。",
      "同一個 the 出現兩次",
      &["The", "cat", "sat", "on", "the", "mat", "by", "the", "door."],
    ),
    SentenceRecord::new(
      "如果明天下雨，我們就待在家裡。",
      "If 子句用現在式表示未來",
      &["If", "it", "rains", "tomorrow,", "we", "will", "stay", "at", "home."],
    ),
    SentenceRecord::new(
      "我已經學英文三年了。",
      "現在完成式：have + p.p. + for",
      &["I", "have", "studied", "English", "for", "three", "years."],
    ),
  ]);

  Corpus::new(levels)
}
