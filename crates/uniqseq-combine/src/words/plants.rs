//! Plant names, one word each.

pub const PLANTS: &[&str] = &[
    "acacia", "agave", "alder", "almond", "aloe", "amaranth", "anise", "apple", "apricot",
    "aster", "avocado", "azalea", "bamboo", "banana", "barley", "basil", "bean", "beech", "beet",
    "begonia", "birch", "blackberry", "bluebell", "borage", "bramble", "broccoli", "buttercup",
    "cabbage", "cactus", "camellia", "carrot", "cashew", "cedar", "celery", "chamomile", "cherry",
    "chestnut", "chicory", "chive", "cilantro", "clover", "coconut", "coffee", "corn", "cotton",
    "cranberry", "crocus", "cucumber", "cypress", "daffodil", "dahlia", "daisy", "dandelion",
    "dill", "elder", "elm", "eucalyptus", "fennel", "fern", "fig", "fir", "foxglove", "gardenia",
    "garlic", "geranium", "ginger", "ginkgo", "gooseberry", "grape", "hawthorn", "hazel",
    "heather", "hemlock", "hibiscus", "holly", "honeysuckle", "hop", "hyacinth", "iris", "ivy",
    "jasmine", "juniper", "kale", "laurel", "lavender", "leek", "lemon", "lettuce", "lilac",
    "lily", "lime", "linden", "lotus", "magnolia", "mahogany", "maize", "mango", "maple",
    "marigold", "melon", "mint", "mistletoe", "moss", "mulberry", "mustard", "myrtle", "nettle",
    "nutmeg", "oak", "oat", "olive", "onion", "orange", "orchid", "oregano", "palm", "pansy",
    "papaya", "parsley", "pea", "peach", "pear", "pecan", "peony", "pepper", "peppermint",
    "petunia", "pine", "pineapple", "pistachio", "plum", "poplar", "poppy", "potato", "primrose",
    "pumpkin", "quince", "radish", "raspberry", "redwood", "rhubarb", "rice", "rose", "rosemary",
    "rye", "saffron", "sage", "sequoia", "sorrel", "soybean", "spinach", "spruce", "squash",
    "strawberry", "sunflower", "sycamore", "tamarind", "tansy", "tea", "teak", "thistle", "thyme",
    "tomato", "tulip", "turnip", "vanilla", "verbena", "vetch", "violet", "walnut", "wheat",
    "willow", "wisteria", "yam", "yarrow", "yew", "zinnia",
];
