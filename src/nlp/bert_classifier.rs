use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use candle_core::{DType, Device, IndexOp, Tensor, D};
use candle_nn::{linear, Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config, DTYPE};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use serde::Deserialize;
use serde_json::json;
use tokenizers::Tokenizer;
use tracing::{info, warn};

use crate::app_config::ModelConfig;
use crate::nlp::engine::{Prediction, StarClassifier};

/// BERT 最大输入长度
const MAX_SEQ_LEN: usize = 512;

/// config.json 中分类头相关字段
#[derive(Debug, Deserialize)]
struct ClassifierHeadConfig {
    id2label: HashMap<String, String>,
}

impl ClassifierHeadConfig {
    /// 按类别下标排序的标签列表
    fn ordered_labels(&self) -> anyhow::Result<Vec<String>> {
        let mut labels = vec![String::new(); self.id2label.len()];
        for (id, label) in &self.id2label {
            let idx: usize = id.parse().with_context(|| format!("id2label 下标无效: {}", id))?;
            let slot = labels
                .get_mut(idx)
                .ok_or_else(|| anyhow!("id2label 下标越界: {}", idx))?;
            *slot = label.clone();
        }
        Ok(labels)
    }
}

/// 模型文件在本地缓存中的路径
struct ModelFiles {
    config: PathBuf,
    tokenizer: TokenizerSource,
    weights: WeightsSource,
}

enum TokenizerSource {
    Json(PathBuf),
    Vocab(PathBuf),
}

enum WeightsSource {
    SafeTensors(PathBuf),
    Pytorch(PathBuf),
}

/// BertForSequenceClassification：编码器 + pooler + 线性分类头
pub struct BertStarClassifier {
    model: BertModel,
    pooler: Linear,
    classifier: Linear,
    tokenizer: Tokenizer,
    labels: Vec<String>,
    device: Device,
}

impl BertStarClassifier {
    /// 从 Hugging Face Hub 下载并加载模型，阻塞执行
    pub fn load(config: &ModelConfig) -> anyhow::Result<Self> {
        info!("Loading NLP Model: {} ({})", config.model_id, config.revision);
        let files = fetch_model_files(config)?;
        let classifier = Self::from_files(&files)?;
        info!("NLP Model Loaded, labels: {:?}", classifier.labels);
        Ok(classifier)
    }

    fn from_files(files: &ModelFiles) -> anyhow::Result<Self> {
        let device = Device::Cpu;

        let raw_config = std::fs::read_to_string(&files.config)
            .with_context(|| format!("读取模型配置失败: {}", files.config.display()))?;
        let bert_config: Config = serde_json::from_str(&raw_config)?;
        let head_config: ClassifierHeadConfig = serde_json::from_str(&raw_config)?;
        let labels = head_config.ordered_labels()?;
        if labels.is_empty() {
            return Err(anyhow!("模型配置缺少 id2label"));
        }

        let tokenizer = match &files.tokenizer {
            TokenizerSource::Json(path) => {
                Tokenizer::from_file(path).map_err(|e| anyhow!("加载 tokenizer.json 失败: {}", e))?
            }
            TokenizerSource::Vocab(path) => wordpiece_tokenizer_from_vocab(path)?,
        };

        let vb = match &files.weights {
            WeightsSource::SafeTensors(path) => unsafe {
                VarBuilder::from_mmaped_safetensors(&[path], DTYPE, &device)?
            },
            WeightsSource::Pytorch(path) => VarBuilder::from_pth(path, DTYPE, &device)?,
        };

        let model = BertModel::load(vb.pp("bert"), &bert_config)?;
        let pooler = linear(
            bert_config.hidden_size,
            bert_config.hidden_size,
            vb.pp("bert.pooler.dense"),
        )?;
        let classifier = linear(bert_config.hidden_size, labels.len(), vb.pp("classifier"))?;

        Ok(Self {
            model,
            pooler,
            classifier,
            tokenizer,
            labels,
            device,
        })
    }

    fn encode(&self, text: &str) -> anyhow::Result<Vec<u32>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| anyhow!("分词失败: {}", e))?;
        let mut ids = encoding.get_ids().to_vec();
        // 超长输入截断，保留末尾的 [SEP]
        if ids.len() > MAX_SEQ_LEN {
            let sep = ids[ids.len() - 1];
            ids.truncate(MAX_SEQ_LEN - 1);
            ids.push(sep);
        }
        Ok(ids)
    }

    fn probabilities(&self, ids: &[u32]) -> anyhow::Result<Vec<f32>> {
        let input_ids = Tensor::new(ids, &self.device)?.unsqueeze(0)?;
        let token_type_ids = input_ids.zeros_like()?;
        let attention_mask = input_ids.ones_like()?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        // [CLS] 向量经过 pooler
        let cls = hidden.i((.., 0))?;
        let pooled = self.pooler.forward(&cls)?.tanh()?;
        let logits = self.classifier.forward(&pooled)?;
        let probs = candle_nn::ops::softmax(&logits, D::Minus1)?
            .squeeze(0)?
            .to_dtype(DType::F32)?
            .to_vec1::<f32>()?;
        Ok(probs)
    }
}

impl StarClassifier for BertStarClassifier {
    fn classify(&self, text: &str) -> anyhow::Result<Prediction> {
        let ids = self.encode(text)?;
        let probs = self.probabilities(&ids)?;

        let (best, score) = probs
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or_else(|| anyhow!("模型输出为空"))?;
        let label = self
            .labels
            .get(best)
            .cloned()
            .ok_or_else(|| anyhow!("模型输出类别越界: {}", best))?;

        Ok(Prediction { label, score })
    }
}

fn fetch_model_files(config: &ModelConfig) -> anyhow::Result<ModelFiles> {
    let api = Api::new()?;
    let repo = api.repo(Repo::with_revision(
        config.model_id.clone(),
        RepoType::Model,
        config.revision.clone(),
    ));

    let config_path = repo.get("config.json")?;

    let tokenizer = match repo.get("tokenizer.json") {
        Ok(path) => TokenizerSource::Json(path),
        Err(e) => {
            warn!("tokenizer.json 不存在({})，改用 vocab.txt", e);
            TokenizerSource::Vocab(repo.get("vocab.txt")?)
        }
    };

    let weights = match repo.get("model.safetensors") {
        Ok(path) => WeightsSource::SafeTensors(path),
        Err(e) => {
            warn!("model.safetensors 不存在({})，改用 pytorch_model.bin", e);
            WeightsSource::Pytorch(repo.get("pytorch_model.bin")?)
        }
    };

    Ok(ModelFiles {
        config: config_path,
        tokenizer,
        weights,
    })
}

/// 用 vocab.txt 组装 uncased BERT WordPiece 分词器
fn wordpiece_tokenizer_from_vocab(path: &Path) -> anyhow::Result<Tokenizer> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("读取词表失败: {}", path.display()))?;
    let vocab: HashMap<&str, u32> = content
        .lines()
        .enumerate()
        .map(|(idx, token)| (token, idx as u32))
        .collect();

    let special_id = |token: &str| -> anyhow::Result<u32> {
        vocab
            .get(token)
            .copied()
            .ok_or_else(|| anyhow!("词表缺少特殊符号 {}", token))
    };
    let cls_id = special_id("[CLS]")?;
    let sep_id = special_id("[SEP]")?;
    special_id("[UNK]")?;

    let tokenizer_json = json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": {
            "type": "BertNormalizer",
            "clean_text": true,
            "handle_chinese_chars": true,
            "strip_accents": null,
            "lowercase": true
        },
        "pre_tokenizer": { "type": "BertPreTokenizer" },
        "post_processor": {
            "type": "BertProcessing",
            "sep": ["[SEP]", sep_id],
            "cls": ["[CLS]", cls_id]
        },
        "decoder": null,
        "model": {
            "type": "WordPiece",
            "unk_token": "[UNK]",
            "continuing_subword_prefix": "##",
            "max_input_chars_per_word": 100,
            "vocab": vocab
        }
    });

    let bytes = serde_json::to_vec(&tokenizer_json)?;
    Tokenizer::from_bytes(bytes).map_err(|e| anyhow!("构建 WordPiece 分词器失败: {}", e))
}
